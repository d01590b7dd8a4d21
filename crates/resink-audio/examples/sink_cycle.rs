//! Runs a sink worker that recreates a null sink five times a second,
//! watches the notification stream, then tears the worker down.

use std::time::Duration;

use resink_audio::sink::NullSink;
use resink_audio::{EngineConfig, Event, start_engine_with_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = EngineConfig {
        tick_interval: Duration::from_millis(200),
        ..EngineConfig::default()
    };
    let mut handle = start_engine_with_config(Box::new(NullSink::open), config)?;
    let mut events = handle.subscribe();

    let watcher = std::thread::spawn(move || {
        loop {
            match events.blocking_recv() {
                Ok(Event::SinkCreated { sink_id }) => println!("created {sink_id}"),
                Ok(Event::SinkDestroyed { sink_id }) => println!("destroyed {sink_id}"),
                Ok(Event::SinkCreateFailed { message }) => println!("create failed: {message}"),
                Ok(Event::WorkerDestroyed) => {
                    println!("worker destroyed");
                    break;
                }
                Err(_) => break,
            }
        }
    });

    std::thread::sleep(Duration::from_secs(1));
    handle.request_stop()?;
    handle.join()?;
    watcher.join().expect("watcher thread");
    Ok(())
}
