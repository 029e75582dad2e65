/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the timer seam of the animation. An animation never sleeps itself - it asks a [`Scheduler`] for a
//! one-shot timer and gets called back with the returned [`TimerToken`] once the timer expires.
//! Who calls back (a tokio task, a test loop advancing virtual time) is up to the scheduler

use std::{collections::BTreeMap, fmt, time::Duration};

use crate::errors::Result;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct TimerToken(pub u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

pub trait Scheduler {
    /// start a one-shot timer. Tokens are never re-used by the same scheduler
    fn schedule_after (&mut self, delay: Duration) -> Result<TimerToken>;

    /// cancel a pending timer. Cancelling an expired or unknown token is a no-op
    fn cancel (&mut self, token: TimerToken);
}

/// a scheduler with virtual time, for deterministic stepping.
/// Timers that are due at the same time expire in the order they were scheduled
#[derive(Debug,Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration,u64),TimerToken>,
}

impl ManualScheduler {
    pub fn new () -> Self { ManualScheduler::default() }

    pub fn now (&self) -> Duration { self.now }

    pub fn pending_count (&self) -> usize { self.pending.len() }

    pub fn is_pending (&self, token: TimerToken) -> bool {
        self.pending.values().any( |t| *t == token)
    }

    /// when the next pending timer is due
    pub fn next_due (&self) -> Option<Duration> {
        self.pending.keys().next().map( |(due,_)| *due)
    }

    /// move virtual time forward by `dt` and return the tokens of all timers that expired, in due order
    pub fn advance (&mut self, dt: Duration) -> Vec<TimerToken> {
        self.now += dt;
        let mut expired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > self.now { break }
            expired.push( entry.remove());
        }
        expired
    }

    /// jump to the next pending timer (if any) and expire it
    pub fn pop_next (&mut self) -> Option<TimerToken> {
        let ((due,_),token) = self.pending.pop_first()?;
        if due > self.now { self.now = due }
        Some(token)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after (&mut self, delay: Duration) -> Result<TimerToken> {
        self.next_id += 1;
        let token = TimerToken(self.next_id);
        self.pending.insert( (self.now + delay, self.next_id), token);
        Ok(token)
    }

    fn cancel (&mut self, token: TimerToken) {
        self.pending.retain( |_,t| *t != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_common::datetime::millis;

    #[test]
    fn test_manual_order () {
        let mut s = ManualScheduler::new();
        let a = s.schedule_after( millis(100)).unwrap();
        let b = s.schedule_after( millis(50)).unwrap();
        let c = s.schedule_after( millis(50)).unwrap();

        assert_eq!( s.advance( millis(49)), vec![]);
        assert_eq!( s.advance( millis(1)), vec![b,c]);
        assert_eq!( s.pop_next(), Some(a));
        assert_eq!( s.now(), millis(100));
        assert_eq!( s.pop_next(), None);
    }

    #[test]
    fn test_manual_cancel () {
        let mut s = ManualScheduler::new();
        let a = s.schedule_after( millis(10)).unwrap();
        assert!( s.is_pending(a));
        s.cancel(a);
        s.cancel(a);
        assert!( !s.is_pending(a));
        assert!( s.advance( millis(20)).is_empty());
    }
}
