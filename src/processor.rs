//! Report queue between a location source and its consumer
use std::{
    sync::{
        mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError},
        Mutex, TryLockError,
    },
    thread,
    time::Instant,
};

use log::{debug, trace};

use crate::prelude::{Error, GpsData, Normalized, Normalizer};

/// Period at which a bounded read retries a busy queue
const LOCK_POLL_PERIOD: std::time::Duration = std::time::Duration::from_micros(100);

/// How long [GpsProcessor::read_data] may wait for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timeout {
    /// Return immediately when no report is pending
    NonBlocking,
    /// Block until a report is available
    #[default]
    Infinite,
    /// Wait up to this duration
    Duration(std::time::Duration),
}

impl Timeout {
    /// Interprets a millisecond timeout: 0 is non blocking,
    /// negative values block indefinitely.
    pub fn from_millis(timeout_ms: i32) -> Self {
        match timeout_ms {
            0 => Self::NonBlocking,
            ms if ms < 0 => Self::Infinite,
            ms => Self::Duration(std::time::Duration::from_millis(ms as u64)),
        }
    }
}

/// [GpsProcessor] queues [GpsData] reports injected by a location source
/// until a consumer reads them, in FIFO order.
pub struct GpsProcessor {
    normalizer: Normalizer,
    sender: Sender<GpsData>,
    receiver: Mutex<Receiver<GpsData>>,
}

impl Default for GpsProcessor {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}

impl GpsProcessor {
    /// Builds a [GpsProcessor] that uses this [Normalizer]
    /// in [Self::read_normalized].
    pub fn new(normalizer: Normalizer) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            normalizer,
            sender,
            receiver: Mutex::new(receiver),
        }
    }

    /// Pushes one report to the queue.
    /// [GpsData::Unknown] reports are rejected.
    pub fn inject_data(&self, data: GpsData) -> Result<(), Error> {
        if matches!(data, GpsData::Unknown) {
            return Err(Error::UnsupportedFormat);
        }
        trace!("injecting {} report", data.data_type());
        self.sender.send(data).map_err(|_| Error::Disconnected)
    }

    /// Pops the next report, waiting according to [Timeout].
    /// Returns [Error::NoData] when nothing was available in time,
    /// including while another reader holds the queue.
    pub fn read_data(&self, timeout: Timeout) -> Result<GpsData, Error> {
        match timeout {
            Timeout::NonBlocking => {
                let receiver = match self.receiver.try_lock() {
                    Ok(receiver) => receiver,
                    Err(TryLockError::WouldBlock) => return Err(Error::NoData),
                    Err(TryLockError::Poisoned(_)) => return Err(Error::Disconnected),
                };
                receiver.try_recv().map_err(|e| match e {
                    TryRecvError::Empty => Error::NoData,
                    TryRecvError::Disconnected => Error::Disconnected,
                })
            },
            Timeout::Infinite => {
                let receiver = self.receiver.lock().map_err(|_| Error::Disconnected)?;
                receiver.recv().map_err(|_| Error::Disconnected)
            },
            Timeout::Duration(dt) => {
                let Some(deadline) = Instant::now().checked_add(dt) else {
                    return self.read_data(Timeout::Infinite);
                };
                let receiver = loop {
                    match self.receiver.try_lock() {
                        Ok(receiver) => break receiver,
                        Err(TryLockError::Poisoned(_)) => return Err(Error::Disconnected),
                        Err(TryLockError::WouldBlock) => {
                            if Instant::now() >= deadline {
                                debug!("gps data queue busy for {:?}", dt);
                                return Err(Error::NoData);
                            }
                            thread::sleep(LOCK_POLL_PERIOD);
                        },
                    }
                };
                let remaining = deadline.saturating_duration_since(Instant::now());
                receiver.recv_timeout(remaining).map_err(|e| match e {
                    RecvTimeoutError::Timeout => {
                        debug!("no gps data within {:?}", dt);
                        Error::NoData
                    },
                    RecvTimeoutError::Disconnected => Error::Disconnected,
                })
            },
        }
    }

    /// Pops the next report and normalizes it.
    pub fn read_normalized(&self, timeout: Timeout) -> Result<Normalized, Error> {
        let data = self.read_data(timeout)?;
        self.normalizer.normalize(&data)
    }
}
