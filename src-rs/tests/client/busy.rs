use crate::client::BusyGuard;
use crate::tests::support::RecordingBusy;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_first_guard_drops() {
        let flag = AtomicBool::new(false);
        let recorder = RecordingBusy::default();

        let guard = BusyGuard::acquire(&flag, &recorder).expect("first acquire");
        assert!(flag.load(Ordering::Acquire));
        assert!(BusyGuard::acquire(&flag, &recorder).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert_eq!(recorder.events(), vec![true, false]);

        let again = BusyGuard::acquire(&flag, &recorder);
        assert!(again.is_some());
    }

    #[test]
    fn guard_is_released_on_early_return() {
        fn failing_step(flag: &AtomicBool, recorder: &RecordingBusy) -> Result<(), &'static str> {
            let _guard = BusyGuard::acquire(flag, recorder).ok_or("busy")?;
            Err("network down")
        }

        let flag = AtomicBool::new(false);
        let recorder = RecordingBusy::default();
        assert_eq!(failing_step(&flag, &recorder), Err("network down"));
        assert!(!flag.load(Ordering::Acquire));
        assert_eq!(recorder.events(), vec![true, false]);
    }
}
