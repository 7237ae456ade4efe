//! Merges N input channels of `T` into one output channel, preserving each
//! source's own order but not the interleaving across sources — the Rust
//! shape of the Go `lo.FanIn` helper the original tool used throughout.

use crossbeam_channel as chan;
use std::thread;

pub fn fan_in<T: Send + 'static>(
    inputs: Vec<chan::Receiver<T>>,
    buffer: usize,
) -> chan::Receiver<T> {
    let (sender, receiver) = chan::bounded(buffer);
    if inputs.is_empty() {
        return receiver;
    }

    let mut forwarders = Vec::with_capacity(inputs.len());
    for input in inputs {
        let sender = sender.clone();
        forwarders.push(thread::spawn(move || {
            for item in input {
                if sender.send(item).is_err() {
                    break;
                }
            }
        }));
    }
    drop(sender);

    thread::spawn(move || {
        for handle in forwarders {
            let _ = handle.join();
        }
    });

    receiver
}
