//! Lazy walks over the dataverse tree.
//!
//! Both walkers fetch one listing per dataverse they expand and one document
//! per item they yield, and only when the next item is requested. Items come
//! in pre-order: every item is followed by its own subtree before its next
//! sibling.

use crate::address::{Address, Provenance};
use crate::client::{print_debug, BaseClient};
use crate::error::Result;
use crate::handle::Handle;
use crate::native_api::dataset::get::Dataset;
use crate::native_api::dataset::get_dataset;

use super::contents::{get_contents, ContentItem};
use super::get::{get_dataverse, Dataverse};

/// Child dataverses of `target`, and with `recursive` all their descendants.
pub fn child_dataverses<'a>(
    client: &'a BaseClient,
    target: &impl Provenance,
    recursive: bool,
) -> ChildDataverses<'a> {
    ChildDataverses {
        client,
        recursive,
        pending: Vec::new(),
        expand: Some(target.address()),
    }
}

/// Datasets of `target`, and with `recursive` those of all descendant dataverses.
pub fn datasets<'a>(
    client: &'a BaseClient,
    target: &impl Provenance,
    recursive: bool,
) -> Datasets<'a> {
    Datasets {
        client,
        recursive,
        pending: Vec::new(),
        expand: Some(target.address()),
    }
}

// Lists `parent` and pushes the kept items so the first one is popped first
fn push_contents<T>(
    client: &BaseClient,
    parent: &Address,
    pending: &mut Vec<T>,
    keep: impl Fn(Handle<ContentItem>) -> Option<T>,
) -> Result<()> {
    print_debug("Expanding", parent.uri().as_str());

    let items: Vec<T> = get_contents(client, parent)?
        .into_iter()
        .filter_map(keep)
        .collect();

    pending.extend(items.into_iter().rev());
    Ok(())
}

/// Iterator returned by [`child_dataverses`].
pub struct ChildDataverses<'a> {
    client: &'a BaseClient,
    recursive: bool,
    pending: Vec<Address>,
    expand: Option<Address>,
}

impl Iterator for ChildDataverses<'_> {
    type Item = Result<Handle<Dataverse>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(parent) = self.expand.take() {
            let keep = |item: Handle<ContentItem>| match item.data {
                ContentItem::Dataverse(_) => Some(item.address()),
                ContentItem::Dataset(_) => None,
            };
            if let Err(e) = push_contents(self.client, &parent, &mut self.pending, keep) {
                return Some(Err(e));
            }
        }

        let child = self.pending.pop()?;
        let result = get_dataverse(self.client, &child);

        if self.recursive {
            if let Ok(handle) = &result {
                self.expand = Some(handle.address());
            }
        }

        Some(result)
    }
}

enum Node {
    Dataverse(Address),
    Dataset(Address),
}

/// Iterator returned by [`datasets`].
pub struct Datasets<'a> {
    client: &'a BaseClient,
    recursive: bool,
    pending: Vec<Node>,
    expand: Option<Address>,
}

impl Iterator for Datasets<'_> {
    type Item = Result<Handle<Dataset>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(parent) = self.expand.take() {
                let recursive = self.recursive;
                let keep = |item: Handle<ContentItem>| match item.data {
                    ContentItem::Dataset(_) => Some(Node::Dataset(item.address())),
                    ContentItem::Dataverse(_) if recursive => {
                        Some(Node::Dataverse(item.address()))
                    }
                    ContentItem::Dataverse(_) => None,
                };
                if let Err(e) = push_contents(self.client, &parent, &mut self.pending, keep) {
                    return Some(Err(e));
                }
            }

            match self.pending.pop()? {
                Node::Dataset(address) => return Some(get_dataset(self.client, &address)),
                Node::Dataverse(address) => self.expand = Some(address),
            }
        }
    }
}
