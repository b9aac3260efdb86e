use contatos_core::models::Contact;
use contatos_core::observable::Observable;

use crate::common::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactsFocus {
    Name,
    Phone,
    Submit,
    List,
}

impl ContactsFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Phone,
            Self::Phone => Self::Submit,
            Self::Submit => Self::List,
            Self::List => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::List,
            Self::Phone => Self::Name,
            Self::Submit => Self::Phone,
            Self::List => Self::Submit,
        }
    }
}

#[derive(Debug)]
pub struct ContactsState {
    pub name: TextField,
    pub phone: TextField,
    pub focus: ContactsFocus,
    pub list: Observable<Vec<Contact>>,
    /// Selected row in the list.
    pub selected: usize,
}

impl Default for ContactsState {
    fn default() -> Self {
        Self {
            name: TextField::new("Nome:"),
            phone: TextField::new("Telefone:"),
            focus: ContactsFocus::Name,
            list: Observable::new(Vec::new()),
            selected: 0,
        }
    }
}

impl ContactsState {
    pub fn contacts(&self) -> &[Contact] {
        self.list.get()
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.contacts().get(self.selected)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            ContactsFocus::Name => Some(&mut self.name),
            ContactsFocus::Phone => Some(&mut self.phone),
            ContactsFocus::Submit | ContactsFocus::List => None,
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.contacts().len() {
            self.selected += 1;
        }
    }

    /// Keeps the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.contacts().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
