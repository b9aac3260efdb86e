//! Non-interactive contact commands.

use anyhow::Result;
use contatos_core::backend::{Backend, StoreOutcome};
use contatos_core::config::Config;
use contatos_core::models::NewContact;
use contatos_core::session::Session;

fn backend(config: &Config) -> Result<Backend> {
    Backend::from_settings(&config.resolve()?)
}

fn into_result<T>(outcome: StoreOutcome<T>) -> Result<T> {
    Ok(outcome.result?)
}

pub async fn list(config: &Config, session: &Session) -> Result<()> {
    let contacts = into_result(backend(config)?.list_contacts(session).await)?;
    if contacts.is_empty() {
        println!("No contacts found.");
        return Ok(());
    }
    for contact in contacts {
        println!("{}  {}  {}", contact.id, contact.name, contact.phone);
    }
    Ok(())
}

pub async fn add(config: &Config, session: &Session, name: &str, phone: &str) -> Result<()> {
    let contact = NewContact::new(name, phone);
    let id = into_result(backend(config)?.create_contact(session, &contact).await)?;
    println!("{id}");
    Ok(())
}

pub async fn delete(config: &Config, session: &Session, id: &str) -> Result<()> {
    into_result(backend(config)?.delete_contact(session, id).await)?;
    println!("Deleted {id}");
    Ok(())
}
