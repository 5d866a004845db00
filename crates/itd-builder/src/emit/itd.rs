//! Introduction unit emission

use super::{member_blocks, render_annotation, seeded_resolver, write_preamble, EmitOptions, MemberStyle};
use crate::itd::ItdTypeDetails;
use std::fmt::Write as _;

/// First lines of every generated introduction unit
pub const INTRODUCTION_UNIT_HEADER: &str = "\
// WARNING: DO NOT EDIT THIS FILE. THIS FILE IS MANAGED BY THE INTRODUCTION GENERATOR.
// You may push code into the target .java compilation unit if you wish to edit any member(s).
";

/// Emit an introduction unit with default layout
#[must_use]
pub fn emit_introduction_unit(itd: &ItdTypeDetails) -> String {
    emit_introduction_unit_with(itd, EmitOptions::default())
}

/// Emit an introduction unit
///
/// Layout: header, package, imports, then a `privileged aspect` holding
/// `declare parents`, `declare @type` and every introduced member.
#[must_use]
pub fn emit_introduction_unit_with(itd: &ItdTypeDetails, opts: EmitOptions) -> String {
    let members = itd.members();
    let mut r = seeded_resolver(itd.governor().name(), members.registered_imports());
    let governor = r.name_of(itd.governor().name());
    let pad = opts.pad(1);

    let mut blocks = Vec::new();
    for parent in members.extends_types() {
        blocks.push(format!("{pad}declare parents: {governor} extends {};\n", r.name_of(parent)));
    }
    for interface in members.implements_types() {
        blocks.push(format!("{pad}declare parents: {governor} implements {};\n", r.name_of(interface)));
    }
    for annotation in members.annotations() {
        blocks.push(format!(
            "{pad}declare @type: {governor}: {};\n",
            render_annotation(annotation, &mut r)
        ));
    }
    blocks.extend(member_blocks(members, MemberStyle::Introduced(&governor), &mut r, opts, 1));

    let mut body = String::new();
    let _ = writeln!(
        body,
        "{}aspect {} {{",
        if itd.is_privileged() { "privileged " } else { "" },
        itd.aspect().simple_type_name()
    );
    for block in blocks {
        body.push('\n');
        body.push_str(&block);
    }
    body.push_str("\n}\n");

    let mut out = String::from(INTRODUCTION_UNIT_HEADER);
    out.push('\n');
    write_preamble(&mut out, &itd.aspect().package(), &r.imports());
    out.push_str(&body);
    out
}
