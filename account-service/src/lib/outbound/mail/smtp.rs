use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::account::errors::MailError;
use crate::account::ports::MailRecipient;
use crate::account::ports::Mailer;
use crate::config::MailConfig;

/// Subject and HTML body of an outgoing mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailContent {
    pub subject: String,
    pub html: String,
}

/// Builds the mails sent to account owners.
#[derive(Debug, Clone)]
pub struct MailTemplates {
    app_name: String,
    client_url: String,
}

impl MailTemplates {
    pub fn new(app_name: impl Into<String>, client_url: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            client_url: client_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn account_confirmation(&self, recipient: &MailRecipient, token: &str) -> MailContent {
        let link = format!("{}/confirmation/{}", self.client_url, token);

        MailContent {
            subject: format!("{} - Confirmation Mail", self.app_name),
            html: format!(
                "<h1>Hi {},</h1>\n<h2>Please click on the link to verify your email: \
                 <a href=\"{}\">click here to verify</a></h2>",
                escape_html(&recipient.name),
                link
            ),
        }
    }

    pub fn password_reset(&self, recipient: &MailRecipient, token: &str) -> MailContent {
        let link = format!("{}/reset-password/{}", self.client_url, token);

        MailContent {
            subject: format!("{} - Forget Password Mail", self.app_name),
            html: format!(
                "<h1>Hi {},</h1>\n<h2>Please click on the link to reset your password: \
                 <a href=\"{}\">reset password</a></h2>",
                escape_html(&recipient.name),
                link
            ),
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// SMTP mailer over a STARTTLS relay.
///
/// Built without a transport when mail is disabled; deliveries are then
/// logged and skipped.
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
    templates: MailTemplates,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e: lettre::address::AddressError| MailError::Address(e.to_string()))?;

        let transport = if config.enabled {
            let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| MailError::Transport(e.to_string()))?
                .port(config.smtp_port);

            if !config.smtp_username.is_empty() {
                builder = builder.credentials(Credentials::new(
                    config.smtp_username.clone(),
                    config.smtp_password.clone(),
                ));
            }

            Some(builder.build())
        } else {
            tracing::warn!("Mail delivery disabled; messages will be logged only");
            None
        };

        Ok(Self {
            transport,
            from,
            templates: MailTemplates::new(config.app_name.clone(), config.client_url.clone()),
        })
    }

    async fn deliver(&self, recipient: &MailRecipient, content: MailContent) -> Result<(), MailError> {
        let Some(transport) = &self.transport else {
            tracing::info!(to = %recipient.email, subject = %content.subject, "Mail disabled, skipping delivery");
            return Ok(());
        };

        let to: Mailbox = recipient
            .email
            .parse()
            .map_err(|e: lettre::address::AddressError| MailError::Address(e.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(content.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(content.html)
            .map_err(|e| MailError::Build(e.to_string()))?;

        transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::info!(to = %recipient.email, subject = %content.subject, "Mail sent");
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_account_confirmation(
        &self,
        recipient: &MailRecipient,
        token: &str,
    ) -> Result<(), MailError> {
        let content = self.templates.account_confirmation(recipient, token);
        self.deliver(recipient, content).await
    }

    async fn send_password_reset(
        &self,
        recipient: &MailRecipient,
        token: &str,
    ) -> Result<(), MailError> {
        let content = self.templates.password_reset(recipient, token);
        self.deliver(recipient, content).await
    }
}
