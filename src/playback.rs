//! Playback state machine over the frame sequence.
//!
//! Two states, Stopped and Playing. The controller never touches the
//! network or the clock itself: callers feed it timestamps (duration since
//! app start) and forward the `FetchRequest`s it issues to the fetch
//! worker. Every request carries a fresh monotonic id and only the latest
//! id is ever accepted back, so responses that were superseded by a later
//! seek are dropped instead of applied out of order. Ticking waits for the
//! previous request to be answered before advancing, which keeps the
//! 150 ms pacing without piling up overlapping fetches.

use std::time::Duration;

use crate::fetch::FetchRequest;

/// Period of the playback timer.
pub const TICK_PERIOD: Duration = Duration::from_millis(150);

pub struct Playback {
    current: u32,
    last: u32,
    playing: bool,
    next_request_id: u64,
    in_flight: Option<u64>,
    last_advance: Duration,
}

impl Playback {
    pub fn new(last_frame: u32) -> Self {
        Playback {
            current: 1,
            last: last_frame,
            playing: false,
            next_request_id: 0,
            in_flight: None,
            last_advance: Duration::ZERO,
        }
    }

    pub fn current_frame(&self) -> u32 {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Jump to a frame, clamped to [1, last]. Always issues a fetch.
    /// Landing on the last frame stops playback.
    pub fn seek(&mut self, frame: u32) -> FetchRequest {
        self.current = frame.clamp(1, self.last);
        if self.current >= self.last {
            self.playing = false;
        }
        self.issue(self.current)
    }

    /// Step back one frame; no-op at frame 1.
    pub fn prev(&mut self) -> Option<FetchRequest> {
        if self.current > 1 {
            Some(self.seek(self.current - 1))
        } else {
            None
        }
    }

    /// Step forward one frame; no-op at the last frame.
    pub fn next(&mut self) -> Option<FetchRequest> {
        if self.current < self.last {
            Some(self.seek(self.current + 1))
        } else {
            None
        }
    }

    /// Start playing unless already on the last frame.
    pub fn play(&mut self, now: Duration) {
        if self.current < self.last {
            self.playing = true;
            self.last_advance = now;
        }
    }

    /// Idempotent.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn set_playing(&mut self, on: bool, now: Duration) {
        if on {
            self.play(now);
        } else {
            self.stop();
        }
    }

    /// Advance while playing: at most one step per TICK_PERIOD, and never
    /// while the previous request is still unanswered.
    pub fn tick(&mut self, now: Duration) -> Option<FetchRequest> {
        if !self.playing || self.in_flight.is_some() {
            return None;
        }
        if now.saturating_sub(self.last_advance) < TICK_PERIOD {
            return None;
        }
        self.last_advance = now;
        self.next()
    }

    /// Report a response id coming back from the fetcher. True iff it is
    /// the latest issued request; stale ids are dropped by the caller.
    pub fn accept(&mut self, response_id: u64) -> bool {
        if self.in_flight == Some(response_id) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    fn issue(&mut self, frame: u32) -> FetchRequest {
        self.next_request_id += 1;
        self.in_flight = Some(self.next_request_id);
        FetchRequest { id: self.next_request_id, frame }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn seek_sets_current_frame_exactly() {
        let mut pb = Playback::new(2155);
        for frame in [1, 2, 100, 2154, 2155] {
            let req = pb.seek(frame);
            assert_eq!(pb.current_frame(), frame);
            assert_eq!(req.frame, frame);
        }
    }

    #[test]
    fn seek_clamps_out_of_range_frames() {
        let mut pb = Playback::new(2155);
        assert_eq!(pb.seek(0).frame, 1);
        assert_eq!(pb.current_frame(), 1);
        assert_eq!(pb.seek(9999).frame, 2155);
        assert_eq!(pb.current_frame(), 2155);
    }

    #[test]
    fn prev_at_first_frame_is_noop() {
        let mut pb = Playback::new(2155);
        assert!(pb.prev().is_none());
        assert_eq!(pb.current_frame(), 1);
    }

    #[test]
    fn next_at_last_frame_is_noop() {
        let mut pb = Playback::new(2155);
        pb.seek(2155);
        assert!(pb.next().is_none());
        assert_eq!(pb.current_frame(), 2155);
    }

    #[test]
    fn play_refused_on_last_frame() {
        let mut pb = Playback::new(5);
        pb.seek(5);
        pb.play(ms(0));
        assert!(!pb.is_playing());
    }

    #[test]
    fn ticks_are_paced_and_wait_for_responses() {
        let mut pb = Playback::new(2155);
        let req = pb.seek(1);
        pb.accept(req.id);
        pb.play(ms(0));

        assert!(pb.tick(ms(100)).is_none(), "before the period elapses");
        let req = pb.tick(ms(150)).expect("first paced advance");
        assert_eq!(req.frame, 2);

        assert!(pb.tick(ms(200)).is_none(), "previous request unanswered");
        assert!(pb.tick(ms(400)).is_none(), "still unanswered, no overlap");
        assert!(pb.accept(req.id));

        assert!(pb.tick(ms(250)).is_none(), "period restarts at the advance");
        let req = pb.tick(ms(300)).expect("second paced advance");
        assert_eq!(req.frame, 3);
        pb.accept(req.id);
    }

    #[test]
    fn playing_auto_stops_at_last_frame() {
        let mut pb = Playback::new(3);
        let req = pb.seek(2);
        pb.accept(req.id);
        pb.play(ms(0));

        let req = pb.tick(ms(150)).expect("advance to final frame");
        assert_eq!(req.frame, 3);
        assert!(!pb.is_playing(), "reaching the last frame stops playback");
        pb.accept(req.id);
        assert!(pb.tick(ms(300)).is_none());
    }

    #[test]
    fn stale_responses_are_rejected() {
        let mut pb = Playback::new(2155);
        let first = pb.seek(5);
        let second = pb.seek(9);
        assert!(!pb.accept(first.id), "superseded by a later seek");
        assert!(pb.accept(second.id));
        assert!(!pb.accept(second.id), "already consumed");
    }

    #[test]
    fn stop_is_idempotent() {
        let mut pb = Playback::new(2155);
        pb.play(ms(0));
        assert!(pb.is_playing());
        pb.stop();
        pb.stop();
        assert!(!pb.is_playing());
    }
}
