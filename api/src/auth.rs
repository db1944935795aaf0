//! Authentication endpoints.
//!
//! Login, registration and logout are the only calls besides the pipeline
//! and the initial load that write the authentication state directly.

use faultfinder_session::{AuthState, Request};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::ApiResult;

const USER_PATH: &str = "auth/user/";
const LOGIN_PATH: &str = "auth/login/";
const REGISTRATION_PATH: &str = "auth/registration/";
const LOGOUT_PATH: &str = "auth/logout/";

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Login name
    pub username: String,
}

/// Username and password for [`AuthApi::login`].
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    /// Login name
    pub username: String,
    /// Password
    pub password: SecretString,
}

impl LoginCredentials {
    /// Create credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "username": self.username,
            "password": self.password.expose_secret(),
        })
    }
}

/// Sign-up form for [`AuthApi::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Login name
    pub username: String,
    /// Password
    pub password1: SecretString,
    /// Password confirmation
    pub password2: SecretString,
}

impl Registration {
    fn to_json(&self) -> Value {
        json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "email": self.email,
            "username": self.username,
            "password1": self.password1.expose_secret(),
            "password2": self.password2.expose_secret(),
        })
    }
}

/// Authentication endpoints.
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
    state: AuthState,
}

impl AuthApi {
    /// Create the endpoint group.
    #[must_use]
    pub const fn new(client: ApiClient, state: AuthState) -> Self {
        Self { client, state }
    }

    /// Fetch the current user. This is the identity check.
    ///
    /// # Errors
    ///
    /// Returns the request failure or a decode error.
    #[instrument(skip(self))]
    pub async fn retrieve_user(&self) -> ApiResult<User> {
        self.client.fetch(&Request::get(USER_PATH)).await
    }

    /// Sign in. On success the session cookies are stored and the state is
    /// marked authenticated.
    ///
    /// # Errors
    ///
    /// Returns the request failure; bad credentials surface as a 401 client
    /// error.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<Option<Value>> {
        let reply = self
            .client
            .send(&Request::post(LOGIN_PATH, credentials.to_json()))
            .await?;
        self.state.mark_authenticated();
        info!("Signed in");
        Ok(reply.body)
    }

    /// Create an account. Does not sign the user in.
    ///
    /// # Errors
    ///
    /// Returns the request failure; validation problems come back as a 400
    /// client error whose body lists the offending fields.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> ApiResult<Option<Value>> {
        let reply = self
            .client
            .send(&Request::post(REGISTRATION_PATH, registration.to_json()))
            .await?;
        Ok(reply.body)
    }

    /// Sign out. The state is marked logged out whatever the server says.
    ///
    /// # Errors
    ///
    /// Returns the request failure, after the state has been updated.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self
            .client
            .send(&Request::post(LOGOUT_PATH, json!({})))
            .await;
        self.state.mark_logged_out();
        info!("Signed out");
        result.map(|_| ())
    }
}
