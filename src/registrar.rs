//! Idempotent registration of a bundle file in a project descriptor.
//!
//! Every step checks for the record it would add before adding it, so
//! running the operation against an up-to-date descriptor changes
//! nothing, and a partially wired descriptor is completed rather than
//! duplicated.

use tracing::debug;

use crate::error::XcbundleError;
use crate::model::ObjectId;
use crate::plist::{Atom, Dict, Value};
use crate::store::Descriptor;

/// How a bundle relates to the descriptor's resource-copy wiring.
pub struct Wiring {
    /// File reference matching the bundle's name, when one exists.
    pub file_ref: Option<ObjectId>,
    pub in_main_group: bool,
    /// Each resource-copy phase, paired with whether it already copies
    /// the bundle.
    pub phases: Vec<(ObjectId, bool)>,
}

impl Wiring {
    /// Fully wired: the file reference exists and every resource-copy
    /// phase copies it. An empty phase list never counts as wired.
    pub fn fully_wired(&self) -> bool {
        self.file_ref.is_some()
            && !self.phases.is_empty()
            && self.phases.iter().all(|(_, wired)| *wired)
    }
}

/// Reports how `bundle_name` is currently wired, without mutating anything.
pub fn inspect(descriptor: &Descriptor, bundle_name: &str) -> Result<Wiring, XcbundleError> {
    let file_ref = descriptor.file_reference_named(bundle_name);
    let main_group = descriptor.main_group().ok();
    let in_main_group = match (&file_ref, &main_group) {
        (Some(file_ref), Some(group)) => descriptor.list_contains(group, "children", file_ref),
        _ => false,
    };
    let build_files = file_ref
        .as_ref()
        .map(|id| descriptor.build_files_for(id))
        .unwrap_or_default();
    let phases = descriptor
        .resources_phases()
        .into_iter()
        .map(|phase| {
            let wired = build_files
                .iter()
                .any(|bf| descriptor.list_contains(&phase, "files", bf));
            (phase, wired)
        })
        .collect();
    Ok(Wiring {
        file_ref,
        in_main_group,
        phases,
    })
}

#[derive(Debug)]
pub enum RegisterOutcome {
    /// The descriptor already copies the bundle; nothing changed.
    AlreadyRegistered { file_ref: ObjectId },
    /// The in-memory descriptor was updated and needs saving.
    Registered {
        file_ref: ObjectId,
        reused_file_ref: bool,
        build_files: Vec<ObjectId>,
    },
}

/// Ensures the descriptor references `bundle_name` exactly once in each
/// resource-copy phase, creating the file reference, group membership,
/// and build-file records as needed.
pub fn register(
    descriptor: &mut Descriptor,
    bundle_name: &str,
    file_type: &str,
) -> Result<RegisterOutcome, XcbundleError> {
    let wiring = inspect(descriptor, bundle_name)?;
    if wiring.fully_wired() {
        if let Some(file_ref) = &wiring.file_ref {
            return Ok(RegisterOutcome::AlreadyRegistered {
                file_ref: file_ref.clone(),
            });
        }
    }

    let main_group = descriptor.main_group()?;
    if wiring.phases.is_empty() {
        return Err(XcbundleError::ResourcesPhaseNotFound);
    }

    let mut ids = descriptor.ids();

    let (file_ref, reused_file_ref) = match wiring.file_ref {
        Some(id) => {
            debug!(id = %id, "reusing existing file reference");
            (id, true)
        }
        None => {
            let id = ObjectId::generate(&ids)?;
            ids.insert(id.clone());
            (id, false)
        }
    };

    descriptor.list_append(&main_group, "children", &file_ref, bundle_name)?;

    if !descriptor.contains_object(&file_ref) {
        descriptor.insert_object(
            &file_ref,
            bundle_name,
            file_reference_record(bundle_name, file_type),
        )?;
    }

    let in_resources = format!("{bundle_name} in Resources");
    let mut build_files = Vec::new();
    for (phase, wired) in &wiring.phases {
        if *wired {
            continue;
        }

        // Prefer a build-file record not yet claimed by any phase over
        // generating a second one for the same file reference.
        let orphan = descriptor.build_files_for(&file_ref).into_iter().find(|bf| {
            !descriptor
                .resources_phases()
                .iter()
                .any(|p| descriptor.list_contains(p, "files", bf))
        });
        let build_file = match orphan {
            Some(id) => id,
            None => {
                let id = ObjectId::generate(&ids)?;
                ids.insert(id.clone());
                id
            }
        };

        if !descriptor.contains_object(&build_file) {
            descriptor.insert_object(
                &build_file,
                &in_resources,
                build_file_record(&file_ref, bundle_name),
            )?;
        }
        descriptor.list_append(phase, "files", &build_file, &in_resources)?;
        build_files.push(build_file);
    }

    debug!(file_ref = %file_ref, phases = build_files.len(), "registered bundle");
    Ok(RegisterOutcome::Registered {
        file_ref,
        reused_file_ref,
        build_files,
    })
}

fn file_reference_record(bundle_name: &str, file_type: &str) -> Dict {
    let mut record = Dict::new();
    record.push(Atom::new("isa"), Value::string("PBXFileReference"));
    record.push(Atom::new("lastKnownFileType"), Value::string(file_type));
    record.push(Atom::new("path"), Value::string(bundle_name));
    record.push(Atom::new("sourceTree"), Value::string("<group>"));
    record
}

fn build_file_record(file_ref: &ObjectId, bundle_name: &str) -> Dict {
    let mut record = Dict::new();
    record.push(Atom::new("isa"), Value::string("PBXBuildFile"));
    record.push(
        Atom::new("fileRef"),
        Value::annotated(file_ref.as_str(), bundle_name),
    );
    record
}
