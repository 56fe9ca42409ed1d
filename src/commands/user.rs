use crate::{
    libs::{config::Config, identity, messages::Message, view::View},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct UserArgs {
    /// Identity token to make active; lists identities when omitted
    token: Option<String>,
}

pub fn cmd(args: UserArgs) -> Result<()> {
    // Environment overrides are not persisted
    let mut config = Config::read()?;

    match args.token {
        None => {
            msg_print!(Message::IdentitiesHeader);
            View::identities(&config.identities, &config.active_identity)?;
        }
        Some(token) => {
            identity::resolve(&config.identities, &token)?;
            config.active_identity = token.clone();
            config.save()?;
            msg_success!(Message::IdentitySwitched(token));
        }
    }

    Ok(())
}
