//! Push-style subscription over item streams
//!
//! Drives any `Stream<Item = Result<T>>` and pushes each item, the terminal
//! error, or completion to an [`Observer`].

use crate::error::{Error, Result};
use futures::{pin_mut, Stream, StreamExt};

/// Whether the observer wants more items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep delivering items
    Continue,
    /// Unsubscribe; no further pages are requested
    Stop,
}

/// Receiver of stream notifications
pub trait Observer<T> {
    /// Called once per item, in stream order
    fn on_next(&mut self, item: T) -> Flow;

    /// Called once if the stream fails
    fn on_error(&mut self, _error: &Error) {}

    /// Called once if the stream runs to completion
    fn on_completed(&mut self) {}
}

impl<T, F> Observer<T> for F
where
    F: FnMut(T) -> Flow,
{
    fn on_next(&mut self, item: T) -> Flow {
        self(item)
    }
}

/// How a subscription ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The stream was exhausted
    Completed {
        /// Items delivered
        delivered: usize,
    },
    /// The observer returned [`Flow::Stop`]
    Unsubscribed {
        /// Items delivered, including the one that stopped it
        delivered: usize,
    },
}

impl Completion {
    /// Items delivered to the observer
    pub fn delivered(&self) -> usize {
        match self {
            Self::Completed { delivered } | Self::Unsubscribed { delivered } => *delivered,
        }
    }
}

/// Drive `stream` to the observer until it completes, fails, or unsubscribes
///
/// The stream is dropped on return, so an unsubscribe never triggers another
/// page fetch. A stream error is reported to `on_error` and also returned.
pub async fn subscribe<T, S, O>(stream: S, observer: &mut O) -> Result<Completion>
where
    S: Stream<Item = Result<T>>,
    O: Observer<T> + ?Sized,
{
    pin_mut!(stream);
    let mut delivered = 0;

    while let Some(next) = stream.next().await {
        match next {
            Ok(item) => {
                delivered += 1;
                if observer.on_next(item) == Flow::Stop {
                    return Ok(Completion::Unsubscribed { delivered });
                }
            }
            Err(e) => {
                observer.on_error(&e);
                return Err(e);
            }
        }
    }

    observer.on_completed();
    Ok(Completion::Completed { delivered })
}
