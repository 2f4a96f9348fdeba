//! Tokio runtime for the drawer state machine
//!
//! A single task owns the [`DrawerController`]. Everything that mutates it
//! (commands from handles, route changes from the navigator, frame ticks)
//! is serialized through that task, so the controller never needs a lock.
//!
//! Frames are only ticked while the controller reports pending work; an
//! idle drawer costs nothing.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use app_core::menu::MenuEntry;

use crate::bridge::DrawerControls;
use crate::config::DrawerConfig;
use crate::drawer::{DrawerController, DrawerEvent, DrawerSnapshot};
use crate::error::Result;
use crate::navigator::Navigator;

/// Input accepted by the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerCommand {
    /// Open the drawer
    Open,
    /// Close the drawer
    Close,
    /// Toggle the drawer
    Toggle,
    /// Finger landed on the panel
    DragStart,
    /// Finger moved
    DragMove {
        /// Displacement since the drag started
        displacement: f32,
    },
    /// Finger lifted
    DragEnd {
        /// Displacement since the drag started
        displacement: f32,
        /// Velocity at release (px/s)
        velocity: f32,
    },
    /// Platform cancelled the touch
    DragTerminate,
    /// Bottom bar item pressed
    SelectBarEntry(MenuEntry),
    /// Drawer item pressed
    SelectDrawerEntry(MenuEntry),
    /// Panel measured by the host
    SetPanelHeight(f32),
    /// Stop the runtime
    Shutdown,
}

/// Cloneable handle to a running drawer
///
/// Commands sent after the runtime stopped are dropped silently.
#[derive(Clone)]
pub struct DrawerHandle {
    commands: mpsc::UnboundedSender<DrawerCommand>,
    snapshots: watch::Receiver<DrawerSnapshot>,
    events: broadcast::Sender<DrawerEvent>,
}

impl DrawerHandle {
    /// Send a raw command
    pub fn send(&self, command: DrawerCommand) {
        if self.commands.send(command).is_err() {
            tracing::debug!("Drawer runtime stopped, command dropped");
        }
    }

    /// Open the drawer
    pub fn open(&self) {
        self.send(DrawerCommand::Open);
    }

    /// Close the drawer
    pub fn close(&self) {
        self.send(DrawerCommand::Close);
    }

    /// Toggle the drawer
    pub fn toggle(&self) {
        self.send(DrawerCommand::Toggle);
    }

    /// Finger landed on the panel
    pub fn drag_start(&self) {
        self.send(DrawerCommand::DragStart);
    }

    /// Finger moved
    pub fn drag_move(&self, displacement: f32) {
        self.send(DrawerCommand::DragMove { displacement });
    }

    /// Finger lifted
    pub fn drag_end(&self, displacement: f32, velocity: f32) {
        self.send(DrawerCommand::DragEnd {
            displacement,
            velocity,
        });
    }

    /// Platform cancelled the touch
    pub fn drag_terminate(&self) {
        self.send(DrawerCommand::DragTerminate);
    }

    /// Bottom bar item pressed
    pub fn select_bar_entry(&self, entry: MenuEntry) {
        self.send(DrawerCommand::SelectBarEntry(entry));
    }

    /// Drawer item pressed
    pub fn select_drawer_entry(&self, entry: MenuEntry) {
        self.send(DrawerCommand::SelectDrawerEntry(entry));
    }

    /// Panel measured by the host
    pub fn set_panel_height(&self, height: f32) {
        self.send(DrawerCommand::SetPanelHeight(height));
    }

    /// Stop the runtime
    pub fn shutdown(&self) {
        self.send(DrawerCommand::Shutdown);
    }

    /// Whether the runtime is still accepting commands
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    /// Last published snapshot
    pub fn snapshot(&self) -> DrawerSnapshot {
        *self.snapshots.borrow()
    }

    /// Whether the drawer counts as open
    pub fn is_open(&self) -> bool {
        self.snapshots.borrow().is_open
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<DrawerSnapshot> {
        self.snapshots.clone()
    }

    /// Subscribe to discrete events
    pub fn subscribe_events(&self) -> broadcast::Receiver<DrawerEvent> {
        self.events.subscribe()
    }
}

impl DrawerControls for DrawerHandle {
    fn toggle(&self) {
        DrawerHandle::toggle(self);
    }

    fn open(&self) {
        DrawerHandle::open(self);
    }

    fn close(&self) {
        DrawerHandle::close(self);
    }
}

impl std::fmt::Debug for DrawerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawerHandle")
            .field("running", &self.is_running())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

/// Event loop driving one drawer
pub struct DrawerRuntime {
    controller: DrawerController,
    commands: mpsc::UnboundedReceiver<DrawerCommand>,
    routes: watch::Receiver<String>,
    frame_interval: Duration,
}

impl DrawerRuntime {
    /// Build a runtime and its first handle without starting it
    pub fn new(
        config: DrawerConfig,
        navigator: Arc<dyn Navigator>,
        routes: watch::Receiver<String>,
    ) -> Result<(Self, DrawerHandle)> {
        config.validate()?;
        let frame_interval = config.frame_interval();
        let controller = DrawerController::new(config, navigator);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let handle = DrawerHandle {
            commands: commands_tx,
            snapshots: controller.subscribe(),
            events: controller.events_sender(),
        };
        let runtime = Self {
            controller,
            commands: commands_rx,
            routes,
            frame_interval,
        };
        Ok((runtime, handle))
    }

    /// Build a runtime and spawn it on the current tokio runtime
    pub fn spawn(
        config: DrawerConfig,
        navigator: Arc<dyn Navigator>,
        routes: watch::Receiver<String>,
    ) -> Result<(DrawerHandle, JoinHandle<()>)> {
        let (runtime, handle) = Self::new(config, navigator, routes)?;
        let task = tokio::spawn(runtime.run());
        Ok((handle, task))
    }

    /// Run until shut down or every handle is dropped
    pub async fn run(mut self) {
        let initial = self.routes.borrow_and_update().clone();
        self.controller.route_changed(&initial);

        let mut routes_open = true;
        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();
        tracing::debug!(route = %initial, "Drawer runtime started");

        loop {
            let ticking = self.controller.needs_frame();

            tokio::select! {
                biased;

                changed = self.routes.changed(), if routes_open => match changed {
                    Ok(()) => {
                        let route = self.routes.borrow_and_update().clone();
                        self.controller.route_changed(&route);
                    }
                    Err(_) => {
                        tracing::debug!("Route source closed");
                        routes_open = false;
                    }
                },

                command = self.commands.recv() => match command {
                    Some(DrawerCommand::Shutdown) | None => break,
                    Some(command) => self.apply(command),
                },

                _ = ticker.tick(), if ticking => {
                    let now = Instant::now();
                    self.controller.advance(now.saturating_duration_since(last_frame));
                    last_frame = now;
                }
            }

            if !ticking && self.controller.needs_frame() {
                ticker.reset();
                last_frame = Instant::now();
            }
        }

        tracing::debug!("Drawer runtime stopped");
    }

    fn apply(&mut self, command: DrawerCommand) {
        let drawer = &mut self.controller;
        match command {
            DrawerCommand::Open => drawer.open(),
            DrawerCommand::Close => drawer.close(),
            DrawerCommand::Toggle => drawer.toggle(),
            DrawerCommand::DragStart => drawer.drag_start(),
            DrawerCommand::DragMove { displacement } => drawer.drag_move(displacement),
            DrawerCommand::DragEnd {
                displacement,
                velocity,
            } => drawer.drag_end(displacement, velocity),
            DrawerCommand::DragTerminate => drawer.drag_terminate(),
            DrawerCommand::SelectBarEntry(entry) => drawer.select_bar_entry(&entry),
            DrawerCommand::SelectDrawerEntry(entry) => drawer.select_drawer_entry(&entry),
            DrawerCommand::SetPanelHeight(height) => drawer.set_panel_height(height),
            DrawerCommand::Shutdown => {}
        }
    }
}
