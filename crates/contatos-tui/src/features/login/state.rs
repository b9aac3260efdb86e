use crate::common::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Submit,
}

impl LoginFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Submit,
            Self::Submit => Self::Email,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Email => Self::Submit,
            Self::Password => Self::Email,
            Self::Submit => Self::Password,
        }
    }
}

#[derive(Debug)]
pub struct LoginState {
    pub email: TextField,
    pub password: TextField,
    pub focus: LoginFocus,
    /// Inline message under the form (last sign-in error).
    pub message: String,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            email: TextField::new("Email"),
            password: TextField::masked("Senha"),
            focus: LoginFocus::Email,
            message: String::new(),
        }
    }
}

impl LoginState {
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            LoginFocus::Email => Some(&mut self.email),
            LoginFocus::Password => Some(&mut self.password),
            LoginFocus::Submit => None,
        }
    }
}
