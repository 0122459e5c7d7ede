//! Walkthrough of both heap variants on a small session
//!
//! Builds two heaps in one forest, merges them, and runs delete-min,
//! decrease-key and delete, printing the tree in preorder after each step.
//! Then sorts the multiplicative sequence `(i * 973133) % 10000` and prints
//! the operation counts.
//!
//! ```bash
//! cargo run --example walkthrough
//! RUST_LOG=self_adjusting_heaps=trace cargo run --example walkthrough
//! ```

use std::error::Error;

use self_adjusting_heaps::sorting::heap_sort;
use self_adjusting_heaps::{Forest, NodeKey, Restructure, Slim, Smooth};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logger() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .try_init()?;
    Ok(())
}

fn print<S: Restructure>(forest: &Forest<(), i32, S>, step: &str, heap: Option<NodeKey>) {
    let keys: Vec<String> = forest.preorder(heap).map(|k| k.to_string()).collect();
    println!("{:<24} {}", step, keys.join(" "));
}

fn insert_all<S: Restructure>(
    forest: &mut Forest<(), i32, S>,
    mut heap: Option<NodeKey>,
    keys: &[i32],
) -> Result<Option<NodeKey>, Box<dyn Error>> {
    for &k in keys {
        heap = Some(forest.insert(k, (), heap)?);
    }
    Ok(heap)
}

fn session<S: Restructure>() -> Result<(), Box<dyn Error>> {
    println!("== {} heap ==", S::NAME);
    let mut forest: Forest<(), i32, S> = Forest::new();

    let mut heap = insert_all(&mut forest, None, &[10, 20, 5])?;
    let temp = forest.make_node(25, ());
    heap = Some(forest.insert_node(temp, heap)?);
    heap = insert_all(&mut forest, heap, &[30, 9, 50, 6, 100, 120, 90])?;

    let mut heap2 = insert_all(&mut forest, None, &[4, 8])?;
    let temp2 = forest.make_node(11, ());
    heap2 = Some(forest.insert_node(temp2, heap2)?);
    heap2 = insert_all(&mut forest, heap2, &[3])?;

    let mut heap3 = forest.merge(heap2, heap)?;
    print(&forest, "merge", heap3);

    for _ in 0..2 {
        heap3 = forest.delete_min(heap3)?.root;
        print(&forest, "delete_min", heap3);
    }

    heap3 = Some(forest.decrease_key(temp2, heap3, 1)?);
    print(&forest, "decrease_key 11 -> 1", heap3);

    for _ in 0..2 {
        heap3 = forest.delete_min(heap3)?.root;
        print(&forest, "delete_min", heap3);
    }

    heap3 = forest.delete(temp, heap3)?.root;
    print(&forest, "delete 25", heap3);

    forest.validate(heap3)?;
    println!("stats: {}", forest.stats());
    Ok(())
}

fn sort_sequence<S: Restructure>() {
    let keys = (1..10_000i64).map(|i| ((i * 973_133) % 10_000) as i32);
    let (sorted, stats) = heap_sort::<S, _>(keys);
    let in_order = sorted.windows(2).all(|w| w[0] <= w[1]);
    println!(
        "{}: sorted {} keys (in order: {}), {}",
        S::NAME,
        sorted.len(),
        in_order,
        stats
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logger()?;

    session::<Slim>()?;
    println!();
    session::<Smooth>()?;
    println!();

    sort_sequence::<Slim>();
    sort_sequence::<Smooth>();
    Ok(())
}
