// crates/htforge-core/src/assemble.rs
// ============================================================================
// Module: Content Assembly
// Description: Joins the rule buffer and splices custom content.
// Purpose: Produce the final .htaccess text for one build.
// Dependencies: htforge-config
// ============================================================================

//! ## Overview
//! The body is the buffer joined with `\n`. Custom content is prepended as
//! `content + "\n\n" + body` or appended as `body + content + "\n"`, even
//! when the body is empty. An empty result means nothing is written.

use htforge_config::ContentOrder;
use htforge_config::CustomContent;

use crate::render::RuleBuffer;

/// Builds the final file content.
#[must_use]
pub fn assemble(buffer: &RuleBuffer, custom: Option<&CustomContent>) -> String {
    let body = buffer.join();
    match custom {
        None => body,
        Some(custom) => match custom.order {
            ContentOrder::Before => format!("{}\n\n{body}", custom.content),
            ContentOrder::After => format!("{body}{}\n", custom.content),
        },
    }
}

#[cfg(test)]
mod tests {
    use htforge_config::HtaccessOptions;

    use super::*;
    use crate::render::render;

    fn signature_buffer() -> RuleBuffer {
        render(&HtaccessOptions {
            disable_server_signature: true,
            ..HtaccessOptions::default()
        })
    }

    #[test]
    fn before_places_content_and_blank_line_first() {
        let custom = CustomContent {
            order: ContentOrder::Before,
            content: "foo".to_string(),
        };
        assert_eq!(
            assemble(&signature_buffer(), Some(&custom)),
            "foo\n\n# Prevent your server from sending the version of the server\nServerSignature Off\n\n"
        );
    }

    #[test]
    fn after_appends_content_and_newline() {
        let custom = CustomContent {
            order: ContentOrder::After,
            content: "foo".to_string(),
        };
        assert_eq!(
            assemble(&signature_buffer(), Some(&custom)),
            "# Prevent your server from sending the version of the server\nServerSignature Off\n\nfoo\n"
        );
    }

    #[test]
    fn custom_content_alone_is_still_written() {
        let custom = CustomContent {
            order: ContentOrder::After,
            content: "foo".to_string(),
        };
        assert_eq!(assemble(&RuleBuffer::new(), Some(&custom)), "foo\n");
        assert_eq!(assemble(&RuleBuffer::new(), None), "");
    }
}
