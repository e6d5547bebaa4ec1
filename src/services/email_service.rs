use crate::error::{Error, Result};
use lettre::message::{header, Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Clone)]
pub struct EmailService {
    smtp_server: String,
    smtp_port: u16,
    address: Option<String>,
    password: Option<String>,
}

impl EmailService {
    pub fn new(
        smtp_server: String,
        smtp_port: u16,
        address: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            smtp_server,
            smtp_port,
            address,
            password,
        }
    }

    /// Escape hatch for tests and local runs without an SMTP relay.
    pub fn sending_disabled() -> bool {
        std::env::var("EMAIL_SEND_DISABLED")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn sender_address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Sends a multipart HTML email. Returns the SMTP reply code on success.
    pub async fn send_html(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        cc: &[String],
        bcc: &[String],
    ) -> Result<String> {
        let (address, password) = self.credentials()?;

        let from: Mailbox = address.parse()?;
        let to: Mailbox = to.parse()?;

        let mut builder = Message::builder().from(from).to(to).subject(subject);
        for addr in cc {
            builder = builder.cc(addr.parse()?);
        }
        for addr in bcc {
            builder = builder.bcc(addr.parse()?);
        }

        let message = builder.singlepart(
            SinglePart::builder()
                .header(header::ContentType::TEXT_HTML)
                .body(html.to_string()),
        )?;

        if Self::sending_disabled() {
            tracing::info!("email sending disabled, skipping SMTP dispatch");
            return Ok("disabled".to_string());
        }

        let creds = Credentials::new(address.to_string(), password.to_string());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_server)
            .map_err(classify_smtp_error)?
            .port(self.smtp_port)
            .credentials(creds)
            .build();

        let response = mailer.send(message).await.map_err(classify_smtp_error)?;
        tracing::info!(server = %self.smtp_server, "email sent");
        Ok(response.code().to_string())
    }

    /// Canned message to the configured sender, used to verify SMTP settings.
    pub async fn send_test_message(&self) -> Result<String> {
        let to = self
            .sender_address()
            .ok_or_else(|| {
                Error::Internal("Email credentials not found in environment variables".to_string())
            })?
            .to_string();

        let html = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2>Test Email</h2>
    <p>This is a test email to verify SMTP configuration.</p>
    <p>If you receive this email, your SMTP setup is working correctly.</p>
    <hr>
    <p style="font-size: 12px;">Sent from the AI Interviewer backend</p>
</div>"#;

        self.send_html(&to, "AI Interviewer - SMTP Test", html, &[], &[])
            .await
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        match (self.address.as_deref(), self.password.as_deref()) {
            (Some(address), Some(password)) => Ok((address, password)),
            _ => Err(Error::Internal(
                "Email credentials not found in environment variables".to_string(),
            )),
        }
    }
}

/// Maps SMTP failures onto the API's error codes: bad credentials are the
/// client's fault (401), transient relay trouble is 503, anything else 500.
fn classify_smtp_error(err: lettre::transport::smtp::Error) -> Error {
    let text = err.to_string().to_lowercase();
    if err.is_permanent() && (text.contains("535") || text.contains("auth")) {
        return Error::Unauthorized("Email authentication failed. Check your credentials.".to_string());
    }
    if err.is_permanent() && (text.contains("recipient") || text.contains("mailbox")) {
        return Error::BadRequest("Invalid recipient email address.".to_string());
    }
    if err.is_transient() || text.contains("connection") || text.contains("timed out") {
        return Error::ServiceUnavailable(
            "Email server unavailable. Please try again later.".to_string(),
        );
    }
    Error::Smtp(err)
}
