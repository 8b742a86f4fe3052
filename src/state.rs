use std::collections::BTreeSet;

use log::info;

use crate::config::MergeOptions;
use crate::data::model::InputFile;
use crate::error::MergeResult;
use crate::merge::{merge, MergeOutput};
use crate::order::MergeOrder;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything a front end remembers between interactions: the current
/// uploads, the chosen order and the merge options. Owned by the caller and
/// passed in explicitly; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Files in upload order.
    pub uploads: Vec<InputFile>,

    /// Chosen merge order over `uploads`.
    pub order: MergeOrder,

    pub options: MergeOptions,
}

impl SessionState {
    /// Replace the upload set. If the set of names changed, the chosen order
    /// is discarded and reset to upload order.
    pub fn set_uploads(&mut self, files: Vec<InputFile>) {
        let names = file_names(&files);
        self.order = reconcile(Some(&self.order), &names);
        self.uploads = files;
    }

    /// Names of the current uploads, in upload order.
    pub fn names(&self) -> Vec<String> {
        file_names(&self.uploads)
    }

    /// Adopt an explicit order (drag list). Rejected unless it is a
    /// permutation of the current uploads.
    pub fn set_order(&mut self, sequence: &[String]) -> MergeResult<()> {
        self.order = MergeOrder::from_sequence(sequence, &self.names())?;
        Ok(())
    }

    /// Adopt an order from per-file position numbers.
    pub fn set_positions(&mut self, positions: &[i64]) -> MergeResult<()> {
        self.order = MergeOrder::from_positions(&self.names(), positions)?;
        Ok(())
    }

    pub fn move_up(&mut self, index: usize) {
        self.order.move_up(index);
    }

    pub fn move_down(&mut self, index: usize) {
        self.order.move_down(index);
    }

    /// Merge the current uploads in the chosen order.
    pub fn merge(&self) -> MergeResult<MergeOutput> {
        merge(&self.uploads, &self.order, &self.options)
    }
}

/// Keep `prior` if it covers exactly the same set of names, otherwise start
/// over from upload order.
pub fn reconcile(prior: Option<&MergeOrder>, names: &[String]) -> MergeOrder {
    let current: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    match prior {
        Some(order) if !order.is_empty() => {
            let previous: BTreeSet<&str> = order.names().iter().map(String::as_str).collect();
            if previous == current && order.len() == names.len() {
                order.clone()
            } else {
                info!(
                    "upload set changed ({} → {} files), resetting merge order",
                    previous.len(),
                    current.len()
                );
                MergeOrder::identity(names)
            }
        }
        _ => MergeOrder::identity(names),
    }
}

fn file_names(files: &[InputFile]) -> Vec<String> {
    files.iter().map(|f| f.name.clone()).collect()
}
