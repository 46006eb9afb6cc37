//! Loaded files.
//!
//! A [`File`] keeps one template artboard per declaration. Hosts either
//! borrow the templates or take independent copies with
//! [`File::instantiate_artboard`]; copies get their own scene and share the
//! animation and state machine definitions.

use hashbrown::HashSet;
use log::debug;

use crate::artboard::Artboard;
use crate::data::{parse_file_json, FileData};
use crate::error::FileError;

#[derive(Clone, Debug)]
pub struct File {
    artboards: Vec<Artboard>,
}

impl File {
    pub fn from_data(data: &FileData) -> Result<Self, FileError> {
        if data.artboards.is_empty() {
            return Err(FileError::NoArtboards);
        }
        let mut seen = HashSet::new();
        let mut artboards = Vec::with_capacity(data.artboards.len());
        for artboard in &data.artboards {
            if !seen.insert(artboard.name.as_str()) {
                return Err(FileError::DuplicateArtboard(artboard.name.clone()));
            }
            artboards.push(Artboard::from_data(artboard)?);
        }
        debug!("loaded file with {} artboard(s)", artboards.len());
        Ok(Self { artboards })
    }

    /// First declared artboard.
    pub fn default_artboard(&self) -> &Artboard {
        &self.artboards[0]
    }

    pub fn artboard_count(&self) -> usize {
        self.artboards.len()
    }

    pub fn artboard_by_index(&self, index: usize) -> Option<&Artboard> {
        self.artboards.get(index)
    }

    pub fn artboard_by_name(&self, name: &str) -> Option<&Artboard> {
        self.artboards.iter().find(|a| a.name() == name)
    }

    /// Independent copy of the named artboard.
    pub fn instantiate_artboard(&self, name: &str) -> Option<Artboard> {
        self.artboard_by_name(name).cloned()
    }
}

/// Parse and build a file document.
pub fn load_file_json(s: &str) -> Result<File, FileError> {
    File::from_data(&parse_file_json(s)?)
}
