use rwqueue::Queue;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const PRODUCERS: usize = 4;
const CONSUMERS: usize = 4;
const PER_PRODUCER: usize = 1_000;
const PER_CONSUMER: usize = 500;

#[test]
fn producers_and_consumers_keep_count() {
    init_tracing();
    let queue = Arc::new(Queue::with_capacity(PRODUCERS * PER_PRODUCER));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    queue.enqueue((p, seq));
                }
            })
        })
        .collect();

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut taken = Vec::with_capacity(PER_CONSUMER);
                while taken.len() < PER_CONSUMER {
                    match queue.dequeue() {
                        Ok(item) => taken.push(item),
                        Err(_) => thread::yield_now(),
                    }
                }
                taken
            })
        })
        .collect();

    for handle in producers {
        handle.join().unwrap();
    }
    let taken: Vec<Vec<(usize, usize)>> =
        consumers.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(
        queue.len(),
        PRODUCERS * PER_PRODUCER - CONSUMERS * PER_CONSUMER
    );

    // each consumer sees every producer's items in production order
    for items in &taken {
        for p in 0..PRODUCERS {
            let seqs: Vec<_> = items.iter().filter(|(q, _)| *q == p).map(|(_, s)| *s).collect();
            assert!(seqs.windows(2).all(|w| w[0] < w[1]), "producer {p} reordered");
        }
    }

    let mut all: HashSet<(usize, usize)> = taken.into_iter().flatten().collect();
    assert_eq!(all.len(), CONSUMERS * PER_CONSUMER, "no item handed out twice");
    while let Ok(item) = queue.dequeue() {
        assert!(all.insert(item), "{item:?} both consumed and left behind");
    }
    assert_eq!(all.len(), PRODUCERS * PER_PRODUCER);
    assert!(queue.is_empty());
    assert_eq!(format!("{queue:?}"), "[]");
}

#[test]
fn indexed_removal_and_readers_interleave() {
    init_tracing();
    let queue: Arc<Queue<usize>> = Arc::new((0..2_000).collect());

    let removers: Vec<_> = (0..2)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut removed = 0usize;
                for i in 0..400 {
                    if queue.get(i % 7).is_ok() {
                        removed += 1;
                    }
                }
                removed
            })
        })
        .collect();

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..400 {
                    let len = queue.len();
                    assert!(len <= 2_000);
                    let _ = queue.peek_at(i % 11);
                    let snapshot = queue.to_vec();
                    assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
                }
            })
        })
        .collect();

    let removed: usize = removers.into_iter().map(|h| h.join().unwrap()).sum();
    for handle in readers {
        handle.join().unwrap();
    }

    assert_eq!(removed, 800);
    assert_eq!(queue.len(), 2_000 - removed);
    queue.enqueue(5_000);
    assert_eq!(queue.peek_at(queue.len() - 1), Ok(5_000));
}

#[test]
fn scanning_pass_while_producing() {
    init_tracing();
    let queue = Arc::new(Queue::new());

    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            for i in 0..2_000u32 {
                queue.enqueue(i);
            }
        })
    };

    let mut cut = 0usize;
    for _ in 0..20 {
        cut += queue.with_write(|inner| {
            let mut n = 0usize;
            inner.reset_range();
            while let Some(v) = inner.next_in_range() {
                if v % 2 == 1 {
                    inner.cut_range_item();
                    n += 1;
                }
            }
            n
        });
        thread::yield_now();
    }
    producer.join().unwrap();

    let left = queue.to_vec();
    assert_eq!(left.len() + cut, 2_000);
    assert!(left.windows(2).all(|w| w[0] < w[1]), "FIFO order survives cuts");
}
