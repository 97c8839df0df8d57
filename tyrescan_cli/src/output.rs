//! Artefact writers: pretty JSON, single-sheet CSV and a multi-sheet workbook,
//! plus the terminal breakdown table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tyrescan_lib::{BusinessType, Dataset, EnrichedRecord, TrackerSummary};

/// Column order shared by the CSV and every workbook sheet.
pub const HEADERS: [&str; 14] = [
    "company_number",
    "company_name",
    "status",
    "company_type",
    "date_of_creation",
    "address",
    "postcode",
    "locality",
    "region",
    "sic_codes",
    "sic_descriptions",
    "is_truck_commercial",
    "is_mobile",
    "categories",
];

pub const ACTIVE_SHEET: &str = "All Active Companies";
pub const TRUCK_SHEET: &str = "Truck Commercial";
pub const MOBILE_SHEET: &str = "Mobile Services";

/// One CSV / sheet row. Field order matches [`HEADERS`].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CompanyRow {
    company_number: String,
    company_name: String,
    status: String,
    company_type: String,
    date_of_creation: String,
    address: String,
    postcode: String,
    locality: String,
    region: String,
    sic_codes: String,
    sic_descriptions: String,
    is_truck_commercial: bool,
    is_mobile: bool,
    categories: String,
}

impl From<&EnrichedRecord> for CompanyRow {
    fn from(r: &EnrichedRecord) -> Self {
        Self {
            company_number: r.company_number.clone(),
            company_name: r.company_name.clone(),
            status: r.status.clone(),
            company_type: r.company_type.clone(),
            date_of_creation: r.date_of_creation.clone(),
            address: r.registered_address.clone(),
            postcode: r.postcode.clone(),
            locality: r.locality.clone(),
            region: r.region.clone(),
            sic_codes: r.sic_codes.clone(),
            sic_descriptions: r.sic_descriptions.clone(),
            is_truck_commercial: r.is_truck_commercial,
            is_mobile: r.is_mobile,
            categories: r.categories.clone(),
        }
    }
}

fn build_company_rows(records: &[EnrichedRecord]) -> Vec<CompanyRow> {
    records.iter().map(CompanyRow::from).collect()
}

/// The three artefact paths for an output directory and file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtefactPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub xlsx: PathBuf,
}

pub fn artefact_paths(dir: &Path, stem: &str) -> ArtefactPaths {
    ArtefactPaths {
        json: dir.join(format!("{}.json", stem)),
        csv: dir.join(format!("{}.csv", stem)),
        xlsx: dir.join(format!("{}.xlsx", stem)),
    }
}

/// Writes all three artefacts.
pub fn write_artefacts(dataset: &Dataset, paths: &ArtefactPaths) -> Result<()> {
    write_json(dataset, &paths.json)?;
    write_csv(&dataset.active_only, &paths.csv)?;
    write_xlsx(dataset, &paths.xlsx)?;
    Ok(())
}

// -- JSON --

/// Pretty-printed with two-space indent.
pub fn write_json(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dataset)
        .with_context(|| format!("writing {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

// -- CSV --

/// Header row is always written, even with no records.
pub fn write_csv(records: &[EnrichedRecord], path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(HEADERS)?;
    for row in build_company_rows(records) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- Workbook --

/// The active sheet is always present; the subset sheets only when non-empty.
pub fn write_xlsx(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheets = [
        (ACTIVE_SHEET, &dataset.active_only, true),
        (TRUCK_SHEET, &dataset.truck_commercial, false),
        (MOBILE_SHEET, &dataset.mobile_services, false),
    ];
    for (name, records, always) in sheets {
        if records.is_empty() && !always {
            continue;
        }
        let worksheet = workbook.add_worksheet();
        fill_sheet(worksheet, name, records)
            .with_context(|| format!("building sheet '{}'", name))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn fill_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    records: &[EnrichedRecord],
) -> Result<(), XlsxError> {
    worksheet.set_name(name)?;
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (i, row) in build_company_rows(records).iter().enumerate() {
        let r = (i + 1) as u32;
        let text = [
            &row.company_number,
            &row.company_name,
            &row.status,
            &row.company_type,
            &row.date_of_creation,
            &row.address,
            &row.postcode,
            &row.locality,
            &row.region,
            &row.sic_codes,
            &row.sic_descriptions,
        ];
        for (col, value) in text.iter().enumerate() {
            worksheet.write_string(r, col as u16, value.as_str())?;
        }
        worksheet.write_boolean(r, 11, row.is_truck_commercial)?;
        worksheet.write_boolean(r, 12, row.is_mobile)?;
        worksheet.write_string(r, 13, &row.categories)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();
    Ok(())
}

// -- Terminal summary --

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Business Type")]
    business_type: String,
    #[tabled(rename = "Companies")]
    companies: usize,
}

fn build_breakdown_rows(breakdown: &[(BusinessType, usize)]) -> Vec<BreakdownRow> {
    breakdown
        .iter()
        .map(|(bt, count)| BreakdownRow {
            business_type: bt.to_string(),
            companies: *count,
        })
        .collect()
}

pub fn breakdown_table(dataset: &Dataset) -> String {
    let mut table = Table::new(build_breakdown_rows(&dataset.business_type_breakdown()));
    table.with(Style::rounded());
    table.to_string()
}

pub fn print_breakdown(dataset: &Dataset) {
    println!("{}", breakdown_table(dataset));
    println!(
        "{} companies, {} active, {} truck/commercial, {} mobile",
        dataset.metadata.total_companies,
        dataset.metadata.active_companies,
        dataset.metadata.truck_commercial_count,
        dataset.metadata.mobile_count
    );
}

pub fn log_request_summary(summary: &TrackerSummary) {
    tracing::info!(
        "requests: {} made, {} ok, {} not found, {} rate limited, {} failed, {:.0}s backoff",
        summary.requests_made,
        summary.requests_succeeded,
        summary.requests_not_found,
        summary.requests_rate_limited,
        summary.requests_failed,
        summary.total_backoff_secs
    );
}
