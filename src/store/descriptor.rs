use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::XcbundleError;
use crate::model::ObjectId;
use crate::plist::{self, Atom, Dict, Entry, Value};

/// A parsed project descriptor bound to its on-disk location.
///
/// Everything runs against the in-memory object model; the file is only
/// touched by [`Descriptor::save`], which rewrites it in a single
/// overwrite. Any failure before that leaves the original untouched.
#[derive(Debug)]
pub struct Descriptor {
    path: PathBuf,
    root: Dict,
}

impl Descriptor {
    pub fn open(path: &Path) -> Result<Self, XcbundleError> {
        if !path.exists() {
            return Err(XcbundleError::DescriptorNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| XcbundleError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(path, &text)
    }

    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Result<Self, XcbundleError> {
        let path = path.into();
        let root = plist::parse(text).map_err(|e| XcbundleError::DescriptorParse {
            path: path.clone(),
            line: e.line,
            column: e.column,
            message: e.message,
        })?;
        let descriptor = Self { path, root };
        let objects = descriptor.objects()?;
        debug!(
            path = %descriptor.path.display(),
            objects = objects.entries().len(),
            "parsed descriptor"
        );
        Ok(descriptor)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn to_text(&self) -> String {
        plist::render(&self.root)
    }

    pub fn save(&self) -> Result<(), XcbundleError> {
        fs::write(&self.path, self.to_text()).map_err(|source| XcbundleError::FileWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn objects(&self) -> Result<&Dict, XcbundleError> {
        self.root
            .get_dict("objects")
            .ok_or(XcbundleError::NoObjectTable)
    }

    fn objects_mut(&mut self) -> Result<&mut Dict, XcbundleError> {
        self.root
            .get_dict_mut("objects")
            .ok_or(XcbundleError::NoObjectTable)
    }

    pub fn object(&self, id: &ObjectId) -> Option<&Dict> {
        self.objects().ok()?.get_dict(id.as_str())
    }

    pub fn contains_object(&self, id: &ObjectId) -> bool {
        self.object(id).is_some()
    }

    /// All identifiers present in the object table.
    pub fn ids(&self) -> HashSet<ObjectId> {
        match self.objects() {
            Ok(objects) => objects
                .entries()
                .iter()
                .map(|e| ObjectId::new(e.key.text.clone()))
                .collect(),
            Err(_) => HashSet::new(),
        }
    }

    /// The `PBXProject` record named by the document's `rootObject`.
    pub fn root_project(&self) -> Result<ObjectId, XcbundleError> {
        let id = self
            .root
            .get_str("rootObject")
            .ok_or(XcbundleError::NoRootObject)?;
        let id = ObjectId::new(id);
        if !self.contains_object(&id) {
            return Err(XcbundleError::DanglingReference { id: id.to_string() });
        }
        Ok(id)
    }

    /// The primary group: the `mainGroup` of the root project record.
    pub fn main_group(&self) -> Result<ObjectId, XcbundleError> {
        let project = self.root_project()?;
        let record = self
            .object(&project)
            .ok_or_else(|| XcbundleError::DanglingReference {
                id: project.to_string(),
            })?;
        let group = record
            .get_str("mainGroup")
            .ok_or(XcbundleError::MainGroupNotFound)?;
        let group = ObjectId::new(group);
        if !self.contains_object(&group) {
            return Err(XcbundleError::MainGroupNotFound);
        }
        Ok(group)
    }

    /// Resource-copy build phases, in document order.
    pub fn resources_phases(&self) -> Vec<ObjectId> {
        self.objects_of_isa("PBXResourcesBuildPhase")
    }

    fn objects_of_isa(&self, isa: &str) -> Vec<ObjectId> {
        let Ok(objects) = self.objects() else {
            return Vec::new();
        };
        objects
            .entries()
            .iter()
            .filter(|e| record_isa(e) == Some(isa))
            .map(|e| ObjectId::new(e.key.text.clone()))
            .collect()
    }

    /// Finds a file reference whose path or display name is `name`.
    pub fn file_reference_named(&self, name: &str) -> Option<ObjectId> {
        let objects = self.objects().ok()?;
        objects.entries().iter().find_map(|e| {
            let record = e.value.as_dict()?;
            if record.get_str("isa") != Some("PBXFileReference") {
                return None;
            }
            let matches =
                record.get_str("path") == Some(name) || record.get_str("name") == Some(name);
            matches.then(|| ObjectId::new(e.key.text.clone()))
        })
    }

    /// Build-file records whose `fileRef` is `file_ref`, in document order.
    pub fn build_files_for(&self, file_ref: &ObjectId) -> Vec<ObjectId> {
        let Ok(objects) = self.objects() else {
            return Vec::new();
        };
        objects
            .entries()
            .iter()
            .filter(|e| {
                e.value.as_dict().is_some_and(|record| {
                    record.get_str("isa") == Some("PBXBuildFile")
                        && record.get_str("fileRef") == Some(file_ref.as_str())
                })
            })
            .map(|e| ObjectId::new(e.key.text.clone()))
            .collect()
    }

    /// True when `member` appears in the id-list field `field` of `holder`
    /// (a group's `children`, a phase's `files`).
    pub fn list_contains(&self, holder: &ObjectId, field: &str, member: &ObjectId) -> bool {
        self.object(holder)
            .and_then(|record| record.get_array(field))
            .is_some_and(|items| items.iter().any(|v| v.as_str() == Some(member.as_str())))
    }

    /// Appends `member` to the id-list field `field` of `holder`, creating
    /// the list when absent. Does nothing when already present.
    pub fn list_append(
        &mut self,
        holder: &ObjectId,
        field: &str,
        member: &ObjectId,
        annotation: &str,
    ) -> Result<(), XcbundleError> {
        if self.list_contains(holder, field, member) {
            return Ok(());
        }
        let objects = self.objects_mut()?;
        let record =
            objects
                .get_dict_mut(holder.as_str())
                .ok_or_else(|| XcbundleError::DanglingReference {
                    id: holder.to_string(),
                })?;
        if record.get_array(field).is_none() {
            record.set(Atom::new(field), Value::Array(Vec::new()));
        }
        if let Some(items) = record.get_array_mut(field) {
            items.push(Value::annotated(member.as_str(), annotation));
        }
        Ok(())
    }

    /// Inserts a record adjacent to its `isa` section: after the last
    /// record with the same `isa`, or at the section-alphabetical position
    /// when no such section exists yet.
    pub fn insert_object(
        &mut self,
        id: &ObjectId,
        annotation: &str,
        record: Dict,
    ) -> Result<(), XcbundleError> {
        let isa = record.get_str("isa").unwrap_or("").to_string();
        let objects = self.objects_mut()?;
        let index = insertion_index(objects, &isa);
        objects.insert_at(
            index,
            Atom::annotated(id.as_str(), annotation),
            Value::Dict(record),
        );
        Ok(())
    }
}

fn record_isa(entry: &Entry) -> Option<&str> {
    entry.value.as_dict().and_then(|d| d.get_str("isa"))
}

fn insertion_index(objects: &Dict, isa: &str) -> usize {
    let mut last_same = None;
    for (i, entry) in objects.entries().iter().enumerate() {
        if record_isa(entry) == Some(isa) {
            last_same = Some(i);
        }
    }
    if let Some(i) = last_same {
        return i + 1;
    }
    for (i, entry) in objects.entries().iter().enumerate() {
        if record_isa(entry).unwrap_or("") > isa {
            return i;
        }
    }
    objects.len()
}
