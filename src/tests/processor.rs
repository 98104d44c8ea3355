use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use crate::{
    prelude::{
        ClockFlags, Config, Error, GgaData, GpsData, GpsDataType, GpsProcessor, Normalizer,
        Timeout,
    },
    tests::{init_logger, raw_batch},
};

#[test]
fn timeouts() {
    assert_eq!(Timeout::from_millis(0), Timeout::NonBlocking);
    assert_eq!(Timeout::from_millis(-1), Timeout::Infinite);
    assert_eq!(Timeout::from_millis(i32::MIN), Timeout::Infinite);
    assert_eq!(
        Timeout::from_millis(250),
        Timeout::Duration(Duration::from_millis(250))
    );
}

#[test]
fn fifo() {
    init_logger();
    let processor = GpsProcessor::default();

    processor
        .inject_data(GpsData::Gga(GgaData::new(1_000, 1.0, 2.0, 3.0)))
        .unwrap();
    processor
        .inject_data(GpsData::Gnss(raw_batch(3, ClockFlags::empty())))
        .unwrap();

    let first = processor.read_data(Timeout::NonBlocking).unwrap();
    assert_eq!(first.data_type(), GpsDataType::Gga);

    let second = processor.read_data(Timeout::NonBlocking).unwrap();
    assert_eq!(second.data_type(), GpsDataType::GnssV1);

    assert_eq!(
        processor.read_data(Timeout::NonBlocking),
        Err(Error::NoData)
    );
}

#[test]
fn unknown_is_rejected() {
    let processor = GpsProcessor::default();
    assert_eq!(
        processor.inject_data(GpsData::Unknown),
        Err(Error::UnsupportedFormat)
    );
    assert_eq!(
        processor.read_data(Timeout::NonBlocking),
        Err(Error::NoData)
    );
}

#[test]
fn bounded_read() {
    let processor = GpsProcessor::default();
    assert_eq!(
        processor.read_data(Timeout::from_millis(20)),
        Err(Error::NoData)
    );
}

#[test]
fn blocking_read() {
    init_logger();
    let processor = Arc::new(GpsProcessor::default());

    let injector = {
        let processor = Arc::clone(&processor);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            processor
                .inject_data(GpsData::Gga(GgaData::new(0, 4.0, 5.0, 6.0)))
                .unwrap();
        })
    };

    let data = processor.read_data(Timeout::Infinite).unwrap();
    assert_eq!(data.data_type(), GpsDataType::Gga);

    injector.join().unwrap();
}

#[test]
fn concurrent_readers() {
    init_logger();
    let processor = Arc::new(GpsProcessor::default());

    let waiting = {
        let processor = Arc::clone(&processor);
        thread::spawn(move || processor.read_data(Timeout::from_millis(500)))
    };

    // let the first reader acquire the queue
    thread::sleep(Duration::from_millis(50));

    let t0 = Instant::now();
    assert_eq!(
        processor.read_data(Timeout::NonBlocking),
        Err(Error::NoData)
    );
    assert!(t0.elapsed() < Duration::from_millis(100));

    let t0 = Instant::now();
    assert_eq!(
        processor.read_data(Timeout::from_millis(50)),
        Err(Error::NoData)
    );
    let elapsed = t0.elapsed();
    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_millis(300));

    processor
        .inject_data(GpsData::Gga(GgaData::new(0, 1.0, 1.0, 1.0)))
        .unwrap();

    let data = waiting.join().unwrap().unwrap();
    assert_eq!(data.data_type(), GpsDataType::Gga);
}

#[test]
fn read_normalized() {
    let normalizer = Normalizer::new(Config::default().with_capacity(2)).unwrap();
    let processor = GpsProcessor::new(normalizer);

    processor
        .inject_data(GpsData::Gnss(raw_batch(5, ClockFlags::HAS_DRIFT)))
        .unwrap();

    let normalized = processor
        .read_normalized(Timeout::Duration(Duration::from_millis(100)))
        .unwrap();

    assert_eq!(normalized.data.len(), 2);
    assert_eq!(
        normalized.warning(),
        Some(Error::CapacityExceeded {
            received: 5,
            capacity: 2
        })
    );

    assert_eq!(
        processor.read_normalized(Timeout::NonBlocking),
        Err(Error::NoData)
    );
}
