//! Plan export
//!
//! Renders a [`BuildPlan`] for the downstream build scripts. The table form
//! nests one entry per worker, one entry per planned layer inside it, and
//! one `{x,z}` pair per column in tour order:
//!
//! ```text
//! data = {
//!   {
//!     {{0,0},{0,1},{1,1}},
//!     {{0,0}}
//!   }
//! }
//! ```

use std::io::{self, Write};
use voxbuild_core::{BuildPlan, ExportFormat, Tour};

/// Default name of the table the build scripts read.
pub const DEFAULT_TABLE_NAME: &str = "data";

fn tour_entry(tour: &Tour) -> String {
    let pairs: Vec<String> = tour.iter().map(|c| c.to_string()).collect();
    format!("{{{}}}", pairs.join(","))
}

/// Render the plan as a nested literal table bound to `name`.
pub fn to_table(plan: &BuildPlan, name: &str) -> String {
    let workers: Vec<String> = plan
        .assignments
        .iter()
        .map(|assignment| {
            let layers: Vec<String> = assignment
                .tours()
                .map(|tour| format!("    {}", tour_entry(tour)))
                .collect();
            if layers.is_empty() {
                "  {}".to_string()
            } else {
                format!("  {{\n{}\n  }}", layers.join(",\n"))
            }
        })
        .collect();

    if workers.is_empty() {
        format!("{} = {{}}\n", name)
    } else {
        format!("{} = {{\n{}\n}}\n", name, workers.join(",\n"))
    }
}

/// Write the plan in the requested format.
pub fn write_plan<W: Write>(
    plan: &BuildPlan,
    format: ExportFormat,
    table_name: &str,
    mut writer: W,
) -> io::Result<()> {
    match format {
        ExportFormat::Lua => writer.write_all(to_table(plan, table_name).as_bytes())?,
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, plan)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}
