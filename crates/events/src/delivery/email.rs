//! Email delivery via SMTP.
//!
//! Used for subscriber confirmations and commemoration announcements. If
//! `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns `None` and no
//! mailer is constructed.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use memorial_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "noreply@memorial.local";

const DEFAULT_SITE_URL: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Base URL used for links in outgoing mail.
    pub public_site_url: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable          | Required | Default                  |
    /// |-------------------|----------|--------------------------|
    /// | `SMTP_HOST`       | yes      |                          |
    /// | `SMTP_PORT`       | no       | `587`                    |
    /// | `SMTP_FROM`       | no       | `noreply@memorial.local` |
    /// | `SMTP_USER`       | no       |                          |
    /// | `SMTP_PASSWORD`   | no       |                          |
    /// | `PUBLIC_SITE_URL` | no       | `http://localhost:5173`  |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            public_site_url: std::env::var("PUBLIC_SITE_URL")
                .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string()),
        })
    }
}

/// A plain-text email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub body: String,
}

/// Link a subscriber can follow to unsubscribe.
pub fn unsubscribe_link(site_url: &str, token: DbId) -> String {
    format!("{}/unsubscribe/{token}", site_url.trim_end_matches('/'))
}

pub fn subscription_confirmation(site_url: &str, token: DbId) -> OutgoingEmail {
    OutgoingEmail {
        subject: "You are subscribed to memorial updates".to_string(),
        body: format!(
            "Thank you for subscribing. We will let you know about upcoming \
             commemorations.\n\nTo unsubscribe: {}",
            unsubscribe_link(site_url, token)
        ),
    }
}

pub fn commemoration_announcement(
    site_url: &str,
    token: DbId,
    title: &str,
    location: &str,
    starts_at: &str,
) -> OutgoingEmail {
    let mut body = format!("{title}\n\nWhen: {starts_at}\n");
    if !location.is_empty() {
        body.push_str(&format!("Where: {location}\n"));
    }
    body.push_str(&format!(
        "\nRegister at {}\n\nTo unsubscribe: {}",
        site_url.trim_end_matches('/'),
        unsubscribe_link(site_url, token)
    ));
    OutgoingEmail {
        subject: format!("Upcoming commemoration: {title}"),
        body,
    }
}

/// Sends plain-text email.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, email: &OutgoingEmail) -> Result<(), EmailError>;

    /// Base URL for links in outgoing mail.
    fn site_url(&self) -> &str;
}

/// SMTP mailer backed by lettre.
pub struct EmailDelivery {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }
}

#[async_trait]
impl Mailer for EmailDelivery {
    async fn send(&self, to: &str, email: &OutgoingEmail) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to.parse()?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.transport.send(message).await?;

        tracing::info!(to, subject = %email.subject, "Email sent");
        Ok(())
    }

    fn site_url(&self) -> &str {
        &self.config.public_site_url
    }
}
