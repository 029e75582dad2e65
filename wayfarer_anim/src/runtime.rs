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

//! running animations on tokio.
//!
//! Each animation is moved into its own task which owns it exclusively - there are no locks. Timer
//! expiry and commands from the [`AnimationHandle`] reach the task as messages, so ticks of the same
//! animation are processed strictly one after the other. Timers are one-shot sleep tasks that send
//! their token back and can be cancelled by aborting them.

use std::{collections::HashMap, time::Duration};
use tokio::{runtime::Handle, sync::{mpsc, oneshot}, task::{AbortHandle, JoinHandle}, time::sleep};

use wayfarer_common::debug;

use crate::driver::Animation;
use crate::errors::{AnimError, Result};
use crate::scheduler::{Scheduler, TimerToken};
use crate::surface::DrawingSurface;

const CMD_QUEUE_LEN: usize = 32;
const TIMER_QUEUE_LEN: usize = 16;

/// commands an [`AnimationHandle`] sends to its animation task
pub enum AnimMsg<S> where S: DrawingSurface {
    Exec( Box<dyn FnOnce(&mut Animation<S>) + Send> ),
    Dispose,
}

/// a scheduler that can only be created within a tokio runtime
pub struct TokioScheduler {
    rt: Handle,
    tx: mpsc::Sender<TimerToken>,
    next_id: u64,
    timers: HashMap<TimerToken,AbortHandle>,
}

impl TokioScheduler {
    pub fn new (tx: mpsc::Sender<TimerToken>) -> Result<Self> {
        let rt = Handle::try_current().map_err( |_| AnimError::NoRuntime)?;
        Ok( TokioScheduler { rt, tx, next_id: 0, timers: HashMap::new() } )
    }

    /// the timer of `token` has fired and its token was received
    pub fn expire (&mut self, token: TimerToken) {
        self.timers.remove( &token);
    }

    pub fn pending_count (&self) -> usize { self.timers.len() }

    pub fn cancel_all (&mut self) {
        for (_,ah) in self.timers.drain() {
            ah.abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after (&mut self, delay: Duration) -> Result<TimerToken> {
        self.next_id += 1;
        let token = TimerToken(self.next_id);
        let tx = self.tx.clone();

        let jh = self.rt.spawn( async move {
            sleep( delay).await;
            let _ = tx.send( token).await; // receiver gone means the animation was dropped
        });
        self.timers.insert( token, jh.abort_handle());
        Ok(token)
    }

    fn cancel (&mut self, token: TimerToken) {
        if let Some(ah) = self.timers.remove( &token) {
            ah.abort();
        }
    }
}

/// start `animation` on its own task. This fails if we are not within a tokio runtime
pub fn spawn_animation<S> (mut animation: Animation<S>) -> Result<AnimationHandle<S>>
    where S: DrawingSurface + Send + 'static
{
    let rt = Handle::try_current().map_err( |_| AnimError::NoRuntime)?;

    let (timer_tx, timer_rx) = mpsc::channel( TIMER_QUEUE_LEN);
    let (tx, rx) = mpsc::channel( CMD_QUEUE_LEN);

    let mut sched = TokioScheduler::new( timer_tx)?;
    animation.start( &mut sched)?;

    let join = rt.spawn( run_animation( animation, sched, timer_rx, rx));
    Ok( AnimationHandle { tx, join: Some(join) } )
}

async fn run_animation<S> (mut animation: Animation<S>, mut sched: TokioScheduler,
                           mut timer_rx: mpsc::Receiver<TimerToken>, mut rx: mpsc::Receiver<AnimMsg<S>>) -> Animation<S>
    where S: DrawingSurface + Send + 'static
{
    debug!("animation task started");
    loop {
        tokio::select! {
            Some(token) = timer_rx.recv() => {
                sched.expire( token);
                animation.on_timer( token, &mut sched);
            }
            msg = rx.recv() => match msg {
                Some(AnimMsg::Exec(f)) => f( &mut animation),
                Some(AnimMsg::Dispose) | None => {
                    animation.dispose( &mut sched);
                    break
                }
            }
        }
    }
    sched.cancel_all();
    debug!("animation task terminated");
    animation
}

/// the only thing consumers of a running animation get. Dropping it closes the command channel,
/// which disposes the animation
pub struct AnimationHandle<S> where S: DrawingSurface + Send + 'static {
    tx: mpsc::Sender<AnimMsg<S>>,
    join: Option<JoinHandle<Animation<S>>>,
}

impl<S> AnimationHandle<S> where S: DrawingSurface + Send + 'static {
    pub fn is_running (&self) -> bool {
        self.join.as_ref().map( |jh| !jh.is_finished()).unwrap_or(false)
    }

    /// run `f` on the animation task and return its result
    pub async fn exec<R,F> (&self, f: F) -> Result<R>
        where R: Send + 'static, F: FnOnce(&mut Animation<S>)->R + Send + 'static
    {
        let (tx, rx) = oneshot::channel();
        let msg = AnimMsg::Exec( Box::new( move |a: &mut Animation<S>| { let _ = tx.send( f(a)); }));
        self.tx.send( msg).await.map_err( |_| AnimError::TaskTerminated)?;
        rx.await.map_err( |_| AnimError::TaskTerminated)
    }

    pub async fn query<R,F> (&self, f: F) -> Result<R>
        where R: Send + 'static, F: FnOnce(&Animation<S>)->R + Send + 'static
    {
        self.exec( move |a| f(a)).await
    }

    /// stop the animation and wait until all of its timers are cancelled and renderings removed.
    /// Returns the disposed animation on the first call, `None` on subsequent ones
    pub async fn dispose (&mut self) -> Option<Animation<S>> {
        let join = self.join.take()?;
        let _ = self.tx.send( AnimMsg::Dispose).await; // task might be gone already
        join.await.ok()
    }
}
