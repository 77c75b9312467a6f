//! Log following.
//!
//! [`run`] is the polling loop: take the next line from a [`LineSource`] and
//! hand it on, or ask the [`Idle`] hook what to do when there is none. The
//! hook is where the loop sleeps, and the only place it can be stopped.

mod idle;
mod source;

use std::ops::ControlFlow;

use crate::error::Result;

pub use idle::{Idle, SleepIdle};
pub use source::{FileTailer, LineSource};

/// Poll `source` until `idle` breaks, passing every line to `on_line`
///
/// Errors from the source or the handler end the loop.
///
/// # Example
/// ```
/// use std::collections::VecDeque;
/// use std::ops::ControlFlow;
///
/// let mut lines: VecDeque<String> = ["a\n", "b\n"].map(String::from).into();
/// let mut seen = Vec::new();
/// direwatch::tail::run(&mut lines, &mut || ControlFlow::Break(()), |line| {
///     seen.push(line.trim_end().to_string());
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(seen, ["a", "b"]);
/// ```
pub fn run<S, I, F>(source: &mut S, idle: &mut I, mut on_line: F) -> Result<()>
where
    S: LineSource + ?Sized,
    I: Idle + ?Sized,
    F: FnMut(&str) -> Result<()>,
{
    loop {
        match source.next_line()? {
            Some(line) => on_line(&line)?,
            None => {
                if let ControlFlow::Break(()) = idle.idle() {
                    log::debug!("Polling stopped");
                    return Ok(());
                }
            }
        }
    }
}
