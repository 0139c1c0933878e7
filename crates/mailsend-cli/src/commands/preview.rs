use crate::commands::{print_json, Context, FileArgs};
use crate::util::file_handles;
use anyhow::Result;
use clap::Args;
use mailsend_core::{build_email_list, parse_email_files, FileSummaryDto};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub files: FileArgs,
}

#[derive(Debug, Serialize)]
struct PreviewReport {
    files: Vec<FileSummaryDto>,
    unique_count: usize,
    emails: Vec<String>,
}

pub fn preview(ctx: &Context<'_>, args: PreviewArgs) -> Result<()> {
    let handles = file_handles(&args.files.files, args.files.mime.as_deref());
    let parsed = parse_email_files(&handles)?;
    let emails = build_email_list(&parsed).into_vec();

    let report = PreviewReport {
        files: parsed
            .iter()
            .map(|file| FileSummaryDto {
                file_name: file.file_name.clone(),
                count: file.emails.len(),
            })
            .collect(),
        unique_count: emails.len(),
        emails,
    };

    if ctx.json {
        return print_json(&report);
    }

    for file in &report.files {
        println!("{} ({})", file.file_name, file.count);
    }
    println!("{} unique emails", report.unique_count);
    for email in &report.emails {
        println!("- {}", email);
    }
    Ok(())
}
