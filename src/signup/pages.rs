//! The registration steps and the fields each one owns

use crate::wizard::StepDefinition;

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

/// Every field collected by the wizard, in display order
pub const SIGNUP_FIELDS: &[&str] = &[FIRST_NAME, LAST_NAME, EMAIL, PASSWORD];

/// Rendering unit of one registration step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupPage {
    Name { heading: String, text: String },
    EmailAndPassword,
}

impl SignupPage {
    pub fn heading(&self) -> &str {
        match self {
            SignupPage::Name { heading, .. } => heading,
            SignupPage::EmailAndPassword => "Account Details",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SignupPage::Name { text, .. } => text,
            SignupPage::EmailAndPassword => "Choose the email and password you will sign in with",
        }
    }
}

/// Display metadata for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub masked: bool,
}

pub fn field_spec(name: &str) -> Option<FieldSpec> {
    let spec = match name {
        FIRST_NAME => FieldSpec {
            name: FIRST_NAME,
            label: "First name",
            masked: false,
        },
        LAST_NAME => FieldSpec {
            name: LAST_NAME,
            label: "Last name",
            masked: false,
        },
        EMAIL => FieldSpec {
            name: EMAIL,
            label: "Email",
            masked: false,
        },
        PASSWORD => FieldSpec {
            name: PASSWORD,
            label: "Password",
            masked: true,
        },
        _ => return None,
    };
    Some(spec)
}

/// The ordered step list handed to the registry
pub fn signup_steps() -> Vec<StepDefinition<SignupPage>> {
    vec![
        StepDefinition::new(
            SignupPage::Name {
                heading: "Personal Details".to_string(),
                text: "Please enter your name".to_string(),
            },
            [FIRST_NAME, LAST_NAME],
        ),
        StepDefinition::new(SignupPage::EmailAndPassword, [EMAIL, PASSWORD]),
    ]
}
