use std::path::Path;

use crate::ClientResult;
use crate::audit::{self, ACTION_LOGIN, ACTION_RECOVERY_LOGIN, ACTION_USER_CREATED};
use crate::auth::{self, SqliteCredentialStore};
use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{LoginData, UserCreateData};

#[derive(Debug, Default)]
pub struct UserCreateOptions<'a> {
    pub username: String,
    pub password: String,
    pub confirmation: String,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct LoginOptions<'a> {
    pub username: String,
    pub password: String,
    pub home_override: Option<&'a Path>,
}

pub fn create(
    username: String,
    password: String,
    confirmation: String,
) -> ClientResult<SuccessEnvelope> {
    create_with_options(UserCreateOptions {
        username,
        password,
        confirmation,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn create_with_options(options: UserCreateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let store =
        SqliteCredentialStore::new(&connection, &setup.db_path, setup.config.auth.hash_cost);

    let username = auth::create_user(
        &store,
        &options.username,
        &options.password,
        &options.confirmation,
    )?;
    audit::append(&connection, &setup.db_path, ACTION_USER_CREATED, &username)?;

    success("user create", UserCreateData { username })
}

pub fn login(username: String, password: String) -> ClientResult<SuccessEnvelope> {
    login_with_options(LoginOptions {
        username,
        password,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn login_with_options(options: LoginOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let store =
        SqliteCredentialStore::new(&connection, &setup.db_path, setup.config.auth.hash_cost);

    let outcome = auth::login(
        &store,
        &options.username,
        &options.password,
        &setup.config.auth,
    )?;
    let action = if outcome.recovery_mode {
        ACTION_RECOVERY_LOGIN
    } else {
        ACTION_LOGIN
    };
    audit::append(&connection, &setup.db_path, action, &outcome.username)?;

    success(
        "login",
        LoginData {
            username: outcome.username,
            recovery_mode: outcome.recovery_mode,
            audit_action: action.to_string(),
        },
    )
}
