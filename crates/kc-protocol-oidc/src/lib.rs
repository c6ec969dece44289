//! # kc-protocol-oidc
//!
//! `OpenID` Connect protocol support for Keycloak Rust.
//!
//! This crate currently provides the OIDC client installation providers:
//! generators for the configuration files an administrator downloads from
//! the admin console to wire an application (or a proxy in front of it)
//! to a Keycloak client.
//!
//! ## Modules
//!
//! - [`installation`] - Client installation SPI and the oauth2-proxy provider

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod installation;

/// Protocol identifier for `OpenID` Connect.
pub const LOGIN_PROTOCOL: &str = "openid-connect";

pub use installation::{
    ClientInstallation, ClientInstallationProvider, ClientInstallationSpi, ConfigLine,
    DisplayNamePolicy, InstallationError, InstallationRequest, InstallationResult,
    IssuerRealmPolicy, OAUTH2_PROXY_PROVIDER_ID, Oauth2ProxyInstallation,
    Oauth2ProxyInstallationFactory, Oauth2ProxyOptions, RenderedConfig, ScopePolicy, TEXT_PLAIN,
    deploy_installation_provider, installation_providers, should_expose_secret,
};
