use std::sync::Arc;
use std::thread;
use std::time::Duration;

use RingQueueMini::RingQueue;
use RingQueueMini::core::config::QueueConfig;
use RingQueueMini::core::error::QueueError;
use RingQueueMini::core::log::{Snapshot, append_snapshots};
use RingQueueMini::core::trace::init_tracing;

const PRODUCERS: usize = 4;
const ITEMS_PER_PRODUCER: usize = 25;
const CONSUMERS: usize = 2;

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("ring-queue-demo: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), QueueError> {
    // First argument, if any, is a JSON config file; otherwise use RING_QUEUE_* vars
    let config = match std::env::args().nth(1) {
        Some(path) => QueueConfig::from_path(path)?,
        None => QueueConfig::from_env()?,
    };
    let queue = Arc::new(RingQueue::<String>::from_config(&config)?);
    let mut snapshots = vec![Snapshot::capture("start", &queue)];

    // Producers push faster than the queue can hold; the oldest items get dropped
    let mut producers = vec![];
    for id in 0..PRODUCERS {
        let queue = Arc::clone(&queue);
        producers.push(thread::spawn(move || {
            for i in 1..=ITEMS_PER_PRODUCER {
                queue.insert(format!("P{id}-Item {i}"));
            }
        }));
    }
    for handle in producers {
        if handle.join().is_err() {
            eprintln!("producer thread panicked");
        }
    }
    let produced = Snapshot::capture("produced", &queue);
    println!("{produced}");
    snapshots.push(produced);

    // The producers just filled the queue, so an empty one here is an error
    let timeout = config.remove_timeout();
    println!("Popped with timeout: {}", queue.remove_timeout(timeout)?);

    // Consumers drain until a wait times out
    let mut consumers = vec![];
    for id in 0..CONSUMERS {
        let queue = Arc::clone(&queue);
        consumers.push(thread::spawn(move || {
            let mut received = 0usize;
            while let Ok(item) = queue.remove_timeout(timeout) {
                println!("C{id} popped: {item}");
                received += 1;
                thread::sleep(Duration::from_millis(1));
            }
            received
        }));
    }
    for (id, handle) in consumers.into_iter().enumerate() {
        match handle.join() {
            Ok(received) => println!("C{id} received {received} items"),
            Err(_) => eprintln!("consumer thread panicked"),
        }
    }
    let drained = Snapshot::capture("drained", &queue);
    println!("{drained}");
    snapshots.push(drained);
    println!("Current count: {}", queue.count());
    println!("Max size: {}", queue.capacity());

    append_snapshots(&snapshots, "output.ndjson")?;
    Ok(())
}
