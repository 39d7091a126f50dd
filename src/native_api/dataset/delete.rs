use crate::address::Provenance;
use crate::client::BaseClient;
use crate::error::Result;
use crate::handle::Handle;
use crate::response::Confirmation;

/// Deletes a dataset that has never been published.
pub fn delete_dataset(
    client: &BaseClient,
    target: &impl Provenance,
) -> Result<Handle<Confirmation>> {
    client.delete(target)
}
