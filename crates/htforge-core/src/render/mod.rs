// crates/htforge-core/src/render/mod.rs
// ============================================================================
// Module: Rule Rendering
// Description: Ordered emission of directive blocks from validated options.
// Purpose: Turn HtaccessOptions into a deterministic line buffer.
// Dependencies: htforge-config
// ============================================================================

//! ## Overview
//! [`render`] walks [`EMITTERS`] in order. Each entry pairs an option group
//! with a predicate and a block builder; a group contributes only when its
//! predicate holds. Every block is followed by [`BLOCK_TERMINATOR`] in the
//! buffer, so joining the buffer with `\n` leaves a blank line after each
//! block.

// ============================================================================
// SECTION: Imports
// ============================================================================

use htforge_config::HtaccessOptions;
use htforge_config::OptionGroup;

pub mod blocks;
pub mod policy;

use policy::PolicyKind;

// ============================================================================
// SECTION: Buffer Types
// ============================================================================

/// Marker pushed after every block.
pub const BLOCK_TERMINATOR: &str = "\n";

/// Comment line plus directive lines for one option group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBlock {
    /// Block lines, comment first.
    lines: Vec<String>,
}

impl DirectiveBlock {
    /// Starts a block with its comment line.
    #[must_use]
    pub fn new(comment: &str) -> Self {
        Self {
            lines: vec![comment.to_string()],
        }
    }

    /// Appends a directive line, builder style.
    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Appends a directive line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Returns the block lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Append-only line buffer owned by one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBuffer {
    /// Lines and terminator markers, in emission order.
    lines: Vec<String>,
    /// Groups that contributed at least one block, in emission order.
    groups: Vec<OptionGroup>,
}

impl RuleBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block followed by the terminator marker.
    pub fn push_block(&mut self, group: OptionGroup, block: DirectiveBlock) {
        self.lines.extend(block.lines);
        self.lines.push(BLOCK_TERMINATOR.to_string());
        if self.groups.last() != Some(&group) {
            self.groups.push(group);
        }
    }

    /// Returns true when no block was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the buffered lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the groups that contributed blocks, in emission order.
    #[must_use]
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// Joins the buffer into text; an empty buffer yields an empty string.
    #[must_use]
    pub fn join(&self) -> String {
        self.lines.join("\n")
    }
}

// ============================================================================
// SECTION: Emitter Table
// ============================================================================

/// One entry of the emission table.
struct Emitter {
    /// Group rendered by this entry.
    group: OptionGroup,
    /// Whether the group contributes to the output.
    applies: fn(&HtaccessOptions) -> bool,
    /// Builds the group's blocks.
    build: fn(&HtaccessOptions) -> Vec<DirectiveBlock>,
}

/// Emission table, in output order.
const EMITTERS: [Emitter; 15] = [
    Emitter {
        group: OptionGroup::DisableDirectoryIndex,
        applies: |o| o.disable_directory_index,
        build: |_| vec![blocks::directory_index()],
    },
    Emitter {
        group: OptionGroup::DisableServerSignature,
        applies: |o| o.disable_server_signature,
        build: |_| vec![blocks::server_signature()],
    },
    Emitter {
        group: OptionGroup::Pingable,
        applies: |o| !o.pingable,
        build: |_| vec![blocks::trace_methods()],
    },
    Emitter {
        group: OptionGroup::ForceHttps,
        applies: |o| o.force_https,
        build: |_| vec![blocks::force_https()],
    },
    Emitter {
        group: OptionGroup::TextCompression,
        applies: |o| !o.text_compression.is_empty(),
        build: |o| vec![blocks::text_compression(&o.text_compression)],
    },
    Emitter {
        group: OptionGroup::NotCachedFiles,
        applies: |o| !o.not_cached_files.is_empty(),
        build: |o| vec![blocks::not_cached_files(&o.not_cached_files)],
    },
    Emitter {
        group: OptionGroup::Redirections,
        applies: |o| !o.redirections.is_empty(),
        build: |o| vec![blocks::redirections(&o.redirections)],
    },
    Emitter {
        group: OptionGroup::PreventScriptInjection,
        applies: |o| o.prevent_script_injection,
        build: |_| vec![blocks::script_injection()],
    },
    Emitter {
        group: OptionGroup::PreventDdosAttacks,
        applies: |o| o.prevent_ddos_attacks.is_some(),
        build: |o| o.prevent_ddos_attacks.iter().map(blocks::request_body_limit).collect(),
    },
    Emitter {
        group: OptionGroup::CustomHeaders,
        applies: |o| !o.custom_headers.is_empty(),
        build: |o| vec![blocks::custom_headers(&o.custom_headers)],
    },
    Emitter {
        group: OptionGroup::BlockedUserAgents,
        applies: |o| !o.blocked_user_agents.is_empty(),
        build: |o| vec![blocks::blocked_user_agents(&o.blocked_user_agents)],
    },
    Emitter {
        group: OptionGroup::BlockedIp,
        applies: |o| !o.blocked_ip.is_empty(),
        build: |o| vec![blocks::blocked_ip(&o.blocked_ip)],
    },
    Emitter {
        group: OptionGroup::FeaturePolicy,
        applies: |o| !o.feature_policy.is_empty(),
        build: |o| vec![blocks::policy_header(PolicyKind::Feature, &o.feature_policy)],
    },
    Emitter {
        group: OptionGroup::ContentSecurityPolicy,
        applies: |o| !o.content_security_policy.is_empty(),
        build: |o| {
            vec![blocks::policy_header(PolicyKind::ContentSecurity, &o.content_security_policy)]
        },
    },
    Emitter {
        group: OptionGroup::FileExpirations,
        applies: |o| o.file_expirations.is_some(),
        build: |o| o.file_expirations.as_ref().map(blocks::file_expirations).unwrap_or_default(),
    },
];

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders validated options into a line buffer.
#[must_use]
pub fn render(options: &HtaccessOptions) -> RuleBuffer {
    let mut buffer = RuleBuffer::new();
    for emitter in &EMITTERS {
        if !(emitter.applies)(options) {
            continue;
        }
        for block in (emitter.build)(options) {
            buffer.push_block(emitter.group, block);
        }
    }
    buffer
}

/// Returns the order in which groups are emitted.
#[must_use]
pub fn emission_order() -> Vec<OptionGroup> {
    EMITTERS.iter().map(|emitter| emitter.group).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
