use crate::domain::ReleaseChanges;
use crate::render::grouping::GroupedChanges;

const ENTRY_BULLET: &str = "    - ";
const CONTINUATION_INDENT: &str = "      ";
const CONTRIBUTOR_BULLET: &str = "        - Contributed by: ";

/// Renders change-sets into the changelog Markdown grammar
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    unreleased_placeholder: String,
}

impl MarkdownWriter {
    /// # Arguments
    /// * `unreleased_placeholder` - Token printed instead of a version for unreleased changes
    pub fn new(unreleased_placeholder: impl Into<String>) -> Self {
        MarkdownWriter {
            unreleased_placeholder: unreleased_placeholder.into(),
        }
    }

    /// Render every change-set, in the order given, into one document
    pub fn render_document(&self, releases: &[ReleaseChanges]) -> String {
        let mut out = String::new();
        for release in releases {
            self.write_release(&mut out, release);
        }
        out
    }

    /// Render one change-set: header line, category sections, contributors
    pub fn render_release(&self, release: &ReleaseChanges) -> String {
        let mut out = String::new();
        self.write_release(&mut out, release);
        out
    }

    fn write_release(&self, out: &mut String, release: &ReleaseChanges) {
        let version = release
            .version
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| self.unreleased_placeholder.clone());
        out.push_str(&format!("# {} {}\n", version, release.date));

        let grouped = GroupedChanges::from_release(release);
        for (category, typed) in grouped.categories() {
            out.push_str(&format!("## __{}__\n", category));
            for (kind, entries) in typed {
                out.push_str(&format!("  - ### {}\n", kind.heading()));
                for entry in entries {
                    write_description(out, &entry.description);
                    if let Some(contributor) = &entry.contributor {
                        out.push_str(CONTRIBUTOR_BULLET);
                        out.push_str(contributor);
                        out.push('\n');
                    }
                }
                out.push('\n');
            }
        }

        let contributors = grouped.contributors();
        if !contributors.is_empty() {
            out.push_str("## __Contributors__\n");
            out.push_str(
                "Special thanks to the following contributors to this release:\n\n",
            );
            out.push_str(&contributors.join(", "));
            out.push_str("\n\n");
        }
    }
}

/// First line becomes the bullet, later lines align under its text, blank lines stay blank
fn write_description(out: &mut String, description: &str) {
    let mut lines = description.trim_end().lines();

    out.push_str(ENTRY_BULLET);
    out.push_str(lines.next().unwrap_or_default());
    out.push('\n');

    for line in lines {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(CONTINUATION_INDENT);
            out.push_str(line);
            out.push('\n');
        }
    }
}
