//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: state machine
//! - [`Driver`]: platform-specific I/O

use relaychat_core::Environment;

use crate::{App, AppAction, AppEvent, Driver, RenderRequest};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment providing the activity clock
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    app: App<E>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a new runtime with the given driver and environment.
    pub fn new(driver: D, env: E) -> Self {
        Self { driver, app: App::new(env) }
    }

    /// Run the main event loop until the app quits or the driver runs out
    /// of events.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll or render. Transport send
    /// failures are not fatal: they are logged and surfaced to the app as
    /// [`AppEvent::Error`].
    pub async fn run(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app, &RenderRequest::Full)?;

        while let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render(request) => self.driver.render(&self.app, &request)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Send(message) => {
                        let channel = message.channel.clone();
                        if let Err(e) = self.driver.send_message(message).await {
                            tracing::error!(%channel, "send failed: {e}");
                            let message = format!("send to {channel} failed: {e}");
                            pending_actions.extend(self.app.handle(AppEvent::Error { message }));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App<E> {
        &self.app
    }
}
