//! REST switch: a boolean switch backed by an HTTP resource.
//!
//! Turning the switch on or off posts the rendered on/off body to the
//! resource; refreshing the state reads the resource and resolves the
//! body, optionally through the value template, into a [`SwitchState`].
//!
//! Every operation is one HTTP request with the configured timeout. There is
//! no retry: a failed call leaves the state untouched and the host tries
//! again on its next poll.
//!
//! The state sits behind a mutex held only for in-memory reads and writes,
//! never across a request. Concurrent operations on one switch are safe but
//! last-write-wins on the state.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use restswitch_domain::config::SwitchConfig;
use restswitch_domain::entity::{SwitchEntity, SwitchState, now};
use restswitch_domain::error::ConfigurationError;
use restswitch_domain::resolve::{self, RENDER_ERROR_VALUE};

use crate::error::{Command, CommandError, CommandFailed, RefreshFailed, ServiceError};
use crate::ports::{HttpClient, TemplateRenderer, TransportError};

/// Timeout of the diagnostic request issued during setup.
///
/// Independent of the configured per-request timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// A switch whose state lives behind a REST resource.
pub struct RestSwitch<H, T> {
    config: SwitchConfig,
    http: H,
    templates: T,
    entity: Mutex<SwitchEntity>,
}

impl<H, T> RestSwitch<H, T>
where
    H: HttpClient,
    T: TemplateRenderer,
{
    /// Create a switch without validating `config` or probing the resource.
    ///
    /// The state starts as [`SwitchState::Unknown`]. Prefer
    /// [`setup`](Self::setup) unless the host already did both.
    #[must_use]
    pub fn new(config: SwitchConfig, http: H, templates: T) -> Self {
        let entity = SwitchEntity::new(&config.name, now());
        Self {
            config,
            http,
            templates,
            entity: Mutex::new(entity),
        }
    }

    /// Validate `config`, probe the resource once, then create the switch.
    ///
    /// The probe only rejects what makes the switch unusable: a URL the
    /// client cannot even send to, and an endpoint that cannot be reached.
    /// Any response, whatever its status, is accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the configuration is invalid, a
    /// template does not compile, the resource has no scheme, or the
    /// endpoint is unreachable.
    pub async fn setup(
        config: SwitchConfig,
        http: H,
        templates: T,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        validate_templates(&config, &templates)?;
        probe(&http, &config.resource).await?;
        tracing::info!(resource = %config.resource, name = %config.name, "rest switch ready");
        Ok(Self::new(config, http, templates))
    }

    /// The configuration this switch was created with.
    #[must_use]
    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    /// Friendly name of the switch.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Tri-valued state, as last observed or commanded.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        self.lock_entity().state
    }

    /// Whether the switch is on. An unknown state reads as off.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state().is_on()
    }

    /// Snapshot of the switch entity.
    #[must_use]
    pub fn snapshot(&self) -> SwitchEntity {
        self.lock_entity().clone()
    }

    /// Post the rendered on body; the switch is on if the endpoint answers `200`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandFailed`] when the body cannot be rendered, the
    /// request fails, or the status is not `200`. The state is unchanged.
    pub async fn turn_on(&self) -> Result<SwitchState, CommandFailed> {
        self.send_command(Command::TurnOn).await
    }

    /// Post the rendered off body; the switch is off if the endpoint answers `200`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandFailed`] when the body cannot be rendered, the
    /// request fails, or the status is not `200`. The state is unchanged.
    pub async fn turn_off(&self) -> Result<SwitchState, CommandFailed> {
        self.send_command(Command::TurnOff).await
    }

    /// Turn the switch off when it is on, on otherwise (including unknown).
    ///
    /// # Errors
    ///
    /// Same as [`turn_on`](Self::turn_on) / [`turn_off`](Self::turn_off).
    pub async fn toggle(&self) -> Result<SwitchState, CommandFailed> {
        if self.is_on() {
            self.turn_off().await
        } else {
            self.turn_on().await
        }
    }

    /// Read the resource and resolve its body into the new state.
    ///
    /// The response status is not inspected: whatever body came back is
    /// resolved.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshFailed`] when no response arrives. The state is
    /// unchanged.
    pub async fn refresh_state(&self) -> Result<SwitchState, RefreshFailed> {
        let resource = &self.config.resource;
        let response = match self.http.get(resource, self.config.timeout()).await {
            Ok(response) => response,
            Err(source) => {
                tracing::warn!(%resource, error = %source, "cannot refresh state");
                return Err(RefreshFailed {
                    resource: resource.clone(),
                    source,
                });
            }
        };

        let state = self.resolve(&response.body);
        tracing::debug!(
            %resource,
            status = response.status,
            %state,
            "state refreshed",
        );
        self.store(state);
        Ok(state)
    }

    /// Resolve a response body into a state, without touching the switch.
    #[must_use]
    pub fn resolve(&self, body: &str) -> SwitchState {
        match &self.config.value_template {
            Some(template) => {
                let rendered = self
                    .templates
                    .render_with_possible_json(template, body, RENDER_ERROR_VALUE);
                resolve::from_rendered(&rendered)
            }
            None => resolve::from_body(body, &self.config.body_on, &self.config.body_off),
        }
    }

    /// Dispatch a host service call and return the resulting snapshot.
    ///
    /// Supported services: `turn_on`, `turn_off`, `toggle` and `update`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnknownService`] for any other name, or the
    /// failure of the underlying operation.
    pub async fn handle_service(&self, service: &str) -> Result<SwitchEntity, ServiceError> {
        match service {
            "turn_on" => {
                self.turn_on().await?;
            }
            "turn_off" => {
                self.turn_off().await?;
            }
            "toggle" => {
                self.toggle().await?;
            }
            "update" => {
                self.refresh_state().await?;
            }
            other => return Err(ServiceError::UnknownService(other.to_string())),
        }
        Ok(self.snapshot())
    }

    async fn send_command(&self, command: Command) -> Result<SwitchState, CommandFailed> {
        let (template, target) = match command {
            Command::TurnOn => (&self.config.body_on, SwitchState::On),
            Command::TurnOff => (&self.config.body_off, SwitchState::Off),
        };

        match self.post_body(template).await {
            Ok(()) => {
                tracing::debug!(resource = %self.config.resource, %command, "command accepted");
                self.store(target);
                Ok(target)
            }
            Err(cause) => {
                tracing::warn!(
                    resource = %self.config.resource,
                    %command,
                    error = %cause,
                    "cannot turn {command}, is the resource offline?",
                );
                Err(CommandFailed {
                    command,
                    resource: self.config.resource.clone(),
                    cause,
                })
            }
        }
    }

    async fn post_body(&self, template: &str) -> Result<(), CommandError> {
        let body = self
            .templates
            .render(template)
            .map_err(CommandError::Render)?;
        let response = self
            .http
            .post(&self.config.resource, body, self.config.timeout())
            .await
            .map_err(CommandError::Transport)?;

        if response.is_ok() {
            Ok(())
        } else {
            Err(CommandError::Rejected {
                status: response.status,
            })
        }
    }

    fn store(&self, state: SwitchState) {
        self.lock_entity().update_state(state, now());
    }

    fn lock_entity(&self) -> MutexGuard<'_, SwitchEntity> {
        self.entity.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Issue the setup-time diagnostic `GET`.
///
/// # Errors
///
/// [`ConfigurationError::MissingScheme`] when the client cannot build the
/// request, [`ConfigurationError::UnreachableEndpoint`] when the connection
/// fails or times out.
pub async fn probe<H: HttpClient>(http: &H, resource: &str) -> Result<(), ConfigurationError> {
    match http.get(resource, PROBE_TIMEOUT).await {
        Ok(response) => {
            tracing::debug!(resource, status = response.status, "probe answered");
            Ok(())
        }
        Err(TransportError::InvalidUrl(err)) => {
            tracing::error!(
                resource,
                error = %err,
                "missing resource or scheme in configuration, add http:// or https:// to the url",
            );
            Err(ConfigurationError::MissingScheme)
        }
        Err(err @ (TransportError::Connect(_) | TransportError::Timeout)) => {
            tracing::error!(resource, error = %err, "no route to resource/endpoint");
            Err(ConfigurationError::UnreachableEndpoint)
        }
        Err(err @ TransportError::Other(_)) => {
            tracing::warn!(resource, error = %err, "probe failed, accepting configuration anyway");
            Ok(())
        }
    }
}

fn validate_templates<T: TemplateRenderer>(
    config: &SwitchConfig,
    templates: &T,
) -> Result<(), ConfigurationError> {
    let fields = [
        ("body_on", Some(&config.body_on)),
        ("body_off", Some(&config.body_off)),
        ("value_template", config.value_template.as_ref()),
    ];
    for (field, template) in fields {
        let Some(template) = template else {
            continue;
        };
        templates
            .validate(template)
            .map_err(|err| ConfigurationError::InvalidTemplate {
                field,
                source: Box::new(err),
            })?;
    }
    Ok(())
}
