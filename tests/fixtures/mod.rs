//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sandbox for end-to-end runs: a config home, platform files and a working
/// directory, all inside one temp dir.
pub struct Sandbox {
    /// Keeps the directory alive for the test's duration
    pub temp: TempDir,
}

impl Sandbox {
    /// Creates an empty sandbox.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp.path().join("config").join("cros-keymap"))
            .expect("Failed to create config dir");
        Self { temp }
    }

    /// Root of the sandbox.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Value for `XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.root().join("config")
    }

    /// Sysfs physmap stand-in.
    pub fn physmap_path(&self) -> PathBuf {
        self.root().join("function_row_physmap")
    }

    /// Device tree stand-in.
    pub fn device_tree_path(&self) -> PathBuf {
        self.root().join("fdt")
    }

    /// Writes a config pinning the architecture and pointing the platform
    /// paths into the sandbox.
    pub fn write_config(&self, architecture: &str) {
        let content = format!(
            "[platform]\narchitecture = \"{}\"\nphysmap = \"{}\"\ndevice_tree = \"{}\"\n",
            architecture,
            self.physmap_path().display(),
            self.device_tree_path().display()
        );
        fs::write(
            self.config_home().join("cros-keymap").join("config.toml"),
            content,
        )
        .expect("Failed to write config");
    }

    /// Writes the physmap file.
    pub fn write_physmap(&self, content: &str) {
        fs::write(self.physmap_path(), content).expect("Failed to write physmap");
    }

    /// Writes the device tree blob.
    pub fn write_device_tree(&self, blob: &[u8]) {
        fs::write(self.device_tree_path(), blob).expect("Failed to write device tree");
    }
}

/// Returns the lines of a `[name]` section, without the header and without
/// trailing blank lines.
pub fn section_body(text: &str, name: &str) -> Vec<String> {
    let header = format!("[{name}]");
    let mut lines: Vec<String> = text
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.starts_with('['))
        .map(ToString::to_string)
        .collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Packs a `linux,keymap` entry.
pub fn keymap_entry(row: u8, col: u8, keycode: u16) -> u32 {
    (u32::from(row) << 24) | (u32::from(col) << 16) | u32::from(keycode)
}

/// Encodes keymap entries as a big-endian property value.
pub fn keymap_value(entries: &[u32]) -> Vec<u8> {
    entries.iter().flat_map(|entry| entry.to_be_bytes()).collect()
}

/// Device tree node used to build test blobs.
pub struct DtNode {
    /// Node name including any unit address
    pub name: String,
    /// Properties in order
    pub props: Vec<(String, Vec<u8>)>,
    /// Child nodes in order
    pub children: Vec<DtNode>,
}

impl DtNode {
    /// Creates a node with no properties or children.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            props: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a property.
    pub fn prop(mut self, name: &str, value: Vec<u8>) -> Self {
        self.props.push((name.to_string(), value));
        self
    }

    /// Adds a child node.
    pub fn child(mut self, child: DtNode) -> Self {
        self.children.push(child);
        self
    }
}

const FDT_MAGIC: u32 = 0xd00d_feed;
const FDT_BEGIN_NODE: u32 = 1;
const FDT_END_NODE: u32 = 2;
const FDT_PROP: u32 = 3;
const FDT_END: u32 = 9;
const HEADER_SIZE: usize = 40;
const MEM_RSVMAP_SIZE: usize = 16;

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn pad4(buf: &mut Vec<u8>) {
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

fn string_offset(strings: &mut Vec<u8>, name: &str) -> u32 {
    let needle: Vec<u8> = name.bytes().chain(std::iter::once(0)).collect();
    let offset = strings
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .unwrap_or_else(|| {
            let offset = strings.len();
            strings.extend_from_slice(&needle);
            offset
        });
    u32::try_from(offset).expect("strings block too large")
}

fn emit_node(node: &DtNode, structs: &mut Vec<u8>, strings: &mut Vec<u8>) {
    push_u32(structs, FDT_BEGIN_NODE);
    structs.extend_from_slice(node.name.as_bytes());
    structs.push(0);
    pad4(structs);

    for (name, value) in &node.props {
        push_u32(structs, FDT_PROP);
        push_u32(structs, u32::try_from(value.len()).expect("property too large"));
        let nameoff = string_offset(strings, name);
        push_u32(structs, nameoff);
        structs.extend_from_slice(value);
        pad4(structs);
    }

    for child in &node.children {
        emit_node(child, structs, strings);
    }

    push_u32(structs, FDT_END_NODE);
}

/// Serializes a flattened device tree (version 17) rooted at `root`.
pub fn build_dtb(root: &DtNode) -> Vec<u8> {
    let mut structs = Vec::new();
    let mut strings = Vec::new();
    emit_node(root, &mut structs, &mut strings);
    push_u32(&mut structs, FDT_END);

    let off_mem_rsvmap = HEADER_SIZE;
    let off_dt_struct = off_mem_rsvmap + MEM_RSVMAP_SIZE;
    let off_dt_strings = off_dt_struct + structs.len();
    let totalsize = off_dt_strings + strings.len();

    let as_u32 = |value: usize| u32::try_from(value).expect("blob too large");

    let mut blob = Vec::with_capacity(totalsize);
    push_u32(&mut blob, FDT_MAGIC);
    push_u32(&mut blob, as_u32(totalsize));
    push_u32(&mut blob, as_u32(off_dt_struct));
    push_u32(&mut blob, as_u32(off_dt_strings));
    push_u32(&mut blob, as_u32(off_mem_rsvmap));
    push_u32(&mut blob, 17); // version
    push_u32(&mut blob, 16); // last_comp_version
    push_u32(&mut blob, 0); // boot_cpuid_phys
    push_u32(&mut blob, as_u32(strings.len()));
    push_u32(&mut blob, as_u32(structs.len()));
    blob.extend_from_slice(&[0; MEM_RSVMAP_SIZE]);
    blob.extend_from_slice(&structs);
    blob.extend_from_slice(&strings);
    blob
}

/// A Chromebook-like tree: the keyboard controller sits under the EC and its
/// keymap mixes alphanumeric keys with the function row.
pub fn chromebook_dtb(function_row: &[u16]) -> Vec<u8> {
    let mut entries = vec![
        keymap_entry(1, 1, 30), // KEY_A
        keymap_entry(1, 4, 1),  // KEY_ESC
    ];
    for (col, keycode) in function_row.iter().enumerate() {
        let col = u8::try_from(col).expect("too many keys");
        entries.push(keymap_entry(0, col + 2, *keycode));
    }
    entries.push(keymap_entry(7, 11, 57)); // KEY_SPACE

    let keyboard = DtNode::new("keyboard-controller")
        .prop("compatible", b"google,cros-ec-keyb\0".to_vec())
        .prop("linux,keymap", keymap_value(&entries));
    let ec = DtNode::new("ec@0")
        .prop("compatible", b"google,cros-ec-spi\0".to_vec())
        .child(keyboard);
    let root = DtNode::new("")
        .prop("model", b"Google Test Board\0".to_vec())
        .child(DtNode::new("spi@11010000").child(ec));

    build_dtb(&root)
}
