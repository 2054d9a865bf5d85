//! Small formatting and timing helpers.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::{Cancel, Runtime};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human readable byte count, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Elapsed time as `M分S秒`, or `S秒` under a minute.
pub fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remaining = seconds % 60;

    if minutes > 0 {
        format!("{}分{}秒", minutes, remaining)
    } else {
        format!("{}秒", remaining)
    }
}

/// Trailing-edge debounce: only the last call in a burst runs.
pub struct Debounced<R: Runtime> {
    runtime: R,
    wait_ms: u32,
    callback: Rc<dyn Fn()>,
    pending: Rc<RefCell<Option<R::Timer>>>,
}

impl<R: Runtime> Clone for Debounced<R> {
    fn clone(&self) -> Self {
        Self {
            runtime: self.runtime.clone(),
            wait_ms: self.wait_ms,
            callback: self.callback.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<R: Runtime> Debounced<R> {
    pub fn new(runtime: R, wait_ms: u32, callback: impl Fn() + 'static) -> Self {
        Self {
            runtime,
            wait_ms,
            callback: Rc::new(callback),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Restart the wait; the callback runs once it elapses undisturbed.
    pub fn call(&self) {
        if let Some(timer) = self.pending.borrow_mut().take() {
            timer.cancel();
        }

        let callback = self.callback.clone();
        let timer = self.runtime.timeout(self.wait_ms, move || callback());
        *self.pending.borrow_mut() = Some(timer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::ManualRuntime;
    use std::cell::Cell;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(500 * 1024 * 1024), "500 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1 GB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0秒");
        assert_eq!(format_duration(59), "59秒");
        assert_eq!(format_duration(125), "2分5秒");
    }

    #[test]
    fn test_debounce_collapses_burst() {
        let runtime = ManualRuntime::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let debounced = Debounced::new(runtime.clone(), 300, move || counter.set(counter.get() + 1));

        debounced.call();
        debounced.call();
        debounced.call();
        runtime.fire_timeouts();

        assert_eq!(calls.get(), 1);
        assert_eq!(runtime.timers_created(), 3);
        assert_eq!(runtime.timers_cancelled(), 2);

        debounced.call();
        runtime.fire_timeouts();
        assert_eq!(calls.get(), 2);
    }
}
