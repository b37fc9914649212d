//! Contact form hand-off to the visitor's email client.
//!
//! The page has no backend: submitting the form builds a `mailto:` URI with a
//! localized subject and a bilingual body, and the host opens it. All user
//! input is percent-encoded, so it cannot inject extra headers or recipients.

use crate::locale::Lang;

/// Errors raised when the form is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// A required field is empty or whitespace.
    #[error("contact form field `{0}` is required")]
    MissingField(&'static str),
    /// The recipient address is empty.
    #[error("contact recipient is not configured")]
    NoRecipient,
}

/// Values entered in the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    fn validate(&self) -> Result<(), ContactError> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("message", &self.message),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ContactError::MissingField(*name)),
            None => Ok(()),
        }
    }

    /// The bilingual message body.
    pub fn body(&self, site: &str) -> String {
        format!(
            "Name / الاسم: {}\n\
             Phone / الهاتف: {}\n\
             Email / البريد الإلكتروني: {}\n\
             \n\
             Message / الرسالة:\n\
             {}\n\
             \n\
             ---\n\
             Sent from {site}",
            self.full_name.trim(),
            self.phone.trim(),
            self.email.trim(),
            self.message.trim(),
        )
    }
}

/// Builds `mailto:` URIs for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailto {
    recipient: String,
    site: String,
}

impl Mailto {
    /// Create a builder for `recipient`, signing messages with `site`.
    pub fn new(recipient: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            site: site.into(),
        }
    }

    /// The subject line in `lang`.
    pub fn subject(lang: Lang) -> &'static str {
        match lang {
            Lang::En => "Message from Personal Website",
            Lang::Ar => "رسالة من الموقع الشخصي",
        }
    }

    /// Build the URI for `form`.
    pub fn link(&self, form: &ContactForm, lang: Lang) -> Result<String, ContactError> {
        if self.recipient.trim().is_empty() {
            return Err(ContactError::NoRecipient);
        }
        form.validate()?;
        Ok(format!(
            "mailto:{}?subject={}&body={}",
            urlencoding::encode(self.recipient.trim()),
            urlencoding::encode(Self::subject(lang)),
            urlencoding::encode(&form.body(&self.site)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            full_name: "Sara".into(),
            phone: "+20 100".into(),
            email: "sara@example.com".into(),
            message: "Hi & bye?".into(),
        }
    }

    fn mailto() -> Mailto {
        Mailto::new("owner@example.com", "Portfolio Website")
    }

    #[test]
    fn english_link() {
        let link = mailto().link(&form(), Lang::En).unwrap();
        assert!(link.starts_with("mailto:owner%40example.com?subject=Message%20from%20Personal%20Website&body="));
        assert!(link.contains("Hi%20%26%20bye%3F"));
        assert!(link.contains("Sent%20from%20Portfolio%20Website"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn arabic_subject_is_encoded() {
        let link = mailto().link(&form(), Lang::Ar).unwrap();
        let subject = urlencoding::encode("رسالة من الموقع الشخصي").into_owned();
        assert!(link.contains(&format!("subject={subject}&")));
    }

    #[test]
    fn input_cannot_inject_parameters() {
        let mut form = form();
        form.message = "x&cc=evil@example.com".into();
        let link = mailto().link(&form, Lang::En).unwrap();
        assert_eq!(link.matches('&').count(), 1);
        assert_eq!(link.matches('?').count(), 1);
    }

    #[test]
    fn body_layout() {
        let body = form().body("Site");
        let lines: Vec<_> = body.lines().collect();
        assert_eq!(lines[0], "Name / الاسم: Sara");
        assert_eq!(lines[3], "");
        assert_eq!(lines[5], "Hi & bye?");
        assert_eq!(lines.last(), Some(&"Sent from Site"));
    }

    #[test]
    fn missing_fields_rejected() {
        let mut form = form();
        form.email = "   ".into();
        assert_eq!(
            mailto().link(&form, Lang::En),
            Err(ContactError::MissingField("email"))
        );
        form.email = "a@b.c".into();
        form.phone.clear();
        assert!(mailto().link(&form, Lang::En).is_ok());
    }

    #[test]
    fn empty_recipient_rejected() {
        let link = Mailto::new(" ", "Site").link(&form(), Lang::En);
        assert_eq!(link, Err(ContactError::NoRecipient));
    }
}
