use crate::domain::model::NormalizedEstimate;
use crate::utils::currency::format_rupiah;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const DESC_WIDTH: usize = 44;
const UNIT_WIDTH: usize = 6;
const VOL_WIDTH: usize = 10;
const PRICE_WIDTH: usize = 16;

/// Rows per page in the exported report, excluding the page header.
const REPORT_PAGE_ROWS: usize = 40;

pub const DISCLAIMER: &str = "\
Batasan Pertanggungjawaban (Disclaimer)
Aplikasi ini adalah alat bantu Estimasi Awal (Owner's Estimate) yang menggunakan
standar SNI 2835:2023 dan AHSP. Hasil perhitungan TIDAK bersifat mengikat secara
hukum dan tidak dapat menggantikan peran konsultan Quantity Surveyor (QS) atau
Kontraktor profesional.
- Volume pekerjaan dihitung berdasarkan rasio luas (taksiran), bukan pengukuran
  gambar kerja (DED) yang presisi.
- Harga satuan mengikuti rata-rata pasar Bali, namun harga riil toko dapat
  berubah sewaktu-waktu (fluktuasi).
- Kondisi tanah diasumsikan normal (tanah datar & keras). Biaya tambahan mungkin
  timbul untuk lahan miring, rawa, atau akses sulit.
*Disarankan menggunakan hasil ini sebagai acuan negosiasi atau perencanaan
budget, bukan sebagai nilai kontrak final.";

fn table_width() -> usize {
    DESC_WIDTH + UNIT_WIDTH + VOL_WIDTH + PRICE_WIDTH * 2 + 4
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Summary cards shown above the table: grand total, duration and
/// category count.
pub fn render_summary(estimate: &NormalizedEstimate) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Total Biaya (Inc. PPN 11%) : {}",
        format_rupiah(estimate.grand_total)
    ));
    lines.push(format!(
        "Estimasi Waktu             : {}",
        estimate.estimated_duration
    ));
    lines.push(format!(
        "Jumlah Kategori            : {} Tahapan",
        estimate.categories.len()
    ));
    lines.push(String::new());
    lines.push("Ringkasan Teknis".to_string());
    lines.push(estimate.project_summary.clone());
    lines.join("\n")
}

fn table_rows(estimate: &NormalizedEstimate) -> Vec<String> {
    let mut rows = Vec::new();
    let rule = "-".repeat(table_width());

    rows.push(format!(
        "{:<desc$} {:<unit$} {:>vol$} {:>price$} {:>price$}",
        "Uraian Pekerjaan",
        "Sat",
        "Vol",
        "Harga Satuan",
        "Jumlah",
        desc = DESC_WIDTH,
        unit = UNIT_WIDTH,
        vol = VOL_WIDTH,
        price = PRICE_WIDTH,
    ));
    rows.push(rule.clone());

    for category in &estimate.categories {
        rows.push(category.category_name.to_uppercase());
        for item in &category.items {
            rows.push(format!(
                "  {:<desc$} {:<unit$} {:>vol$.2} {:>price$} {:>price$}",
                truncate(&item.description, DESC_WIDTH - 2),
                truncate(&item.unit, UNIT_WIDTH),
                item.volume,
                format_rupiah(item.unit_price),
                format_rupiah(item.total_price),
                desc = DESC_WIDTH - 2,
                unit = UNIT_WIDTH,
                vol = VOL_WIDTH,
                price = PRICE_WIDTH,
            ));
        }
        rows.push(format!(
            "{:>lead$} {:>price$}",
            "Subtotal",
            format_rupiah(category.subtotal),
            lead = table_width() - PRICE_WIDTH - 1,
            price = PRICE_WIDTH,
        ));
    }

    rows.push(rule);
    for (label, amount) in [
        ("Biaya Fisik", estimate.construction_cost),
        ("PPN 11%", estimate.tax_amount),
        ("GRAND TOTAL", estimate.grand_total),
    ] {
        rows.push(format!(
            "{:>lead$} {:>price$}",
            label,
            format_rupiah(amount),
            lead = table_width() - PRICE_WIDTH - 1,
            price = PRICE_WIDTH,
        ));
    }

    rows
}

/// The full budget table grouped by category, with subtotal rows and
/// the Biaya Fisik / PPN 11% / GRAND TOTAL footer.
pub fn render_table(estimate: &NormalizedEstimate) -> String {
    table_rows(estimate).join("\n")
}

/// Proportional breakdown: one bar per category, value = subtotal.
pub fn render_chart(estimate: &NormalizedEstimate) -> String {
    const BAR_WIDTH: f64 = 40.0;
    let total: f64 = estimate.construction_cost;
    let mut lines = vec!["Proporsi Biaya".to_string()];

    for category in &estimate.categories {
        let share = if total > 0.0 {
            category.subtotal / total
        } else {
            0.0
        };
        let filled = (share * BAR_WIDTH).round() as usize;
        lines.push(format!(
            "{:<30} {:<40} {:>5.1}%",
            truncate(&category.category_name, 30),
            "█".repeat(filled),
            share * 100.0,
        ));
    }

    lines.join("\n")
}

/// CSV mirror of the table: category rows, items, subtotals and the
/// three footer figures.
pub fn export_csv(estimate: &NormalizedEstimate) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Uraian Pekerjaan", "Satuan", "Volume", "Harga Satuan", "Jumlah"])?;

    for category in &estimate.categories {
        writer.write_record([category.category_name.as_str(), "", "", "", ""])?;
        for item in &category.items {
            let volume = format!("{}", item.volume);
            let unit_price = format!("{}", item.unit_price);
            let total_price = format!("{}", item.total_price);
            writer.write_record([
                item.description.as_str(),
                item.unit.as_str(),
                volume.as_str(),
                unit_price.as_str(),
                total_price.as_str(),
            ])?;
        }
        let subtotal = format!("{}", category.subtotal);
        writer.write_record(["Subtotal", "", "", "", subtotal.as_str()])?;
    }

    for (label, amount) in [
        ("Biaya Fisik", estimate.construction_cost),
        ("PPN 11%", estimate.tax_amount),
        ("GRAND TOTAL", estimate.grand_total),
    ] {
        let amount = format!("{}", amount);
        writer.write_record([label, "", "", "", amount.as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()).into())
}

/// Paginated plain-text report mirroring the table, with a dated
/// header per page and the same footer totals.
pub fn render_report(estimate: &NormalizedEstimate, project_name: &str) -> String {
    let rows = table_rows(estimate);
    let date = chrono::Local::now().format("%d-%m-%Y");
    let page_count = rows.len().div_ceil(REPORT_PAGE_ROWS);

    let mut out = Vec::new();
    for (page, chunk) in rows.chunks(REPORT_PAGE_ROWS).enumerate() {
        out.push(format!(
            "RENCANA ANGGARAN BIAYA — {} — {} — Halaman {}/{}",
            project_name,
            date,
            page + 1,
            page_count
        ));
        out.push("=".repeat(table_width()));
        out.extend(chunk.iter().cloned());
        out.push(String::new());
    }

    out.push("Ringkasan Teknis".to_string());
    out.push(estimate.project_summary.clone());
    out.push(String::new());
    out.push(DISCLAIMER.to_string());
    out.join("\n")
}

/// Assembles the export archive: `rab_detail.csv` plus the paginated
/// `laporan_rab.txt`.
pub fn build_export_archive(
    estimate: &NormalizedEstimate,
    project_name: &str,
) -> Result<Vec<u8>> {
    let csv_data = export_csv(estimate)?;
    let report = render_report(estimate, project_name);

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file::<_, ()>("rab_detail.csv", FileOptions::default())?;
    zip.write_all(&csv_data)?;
    zip.start_file::<_, ()>("laporan_rab.txt", FileOptions::default())?;
    zip.write_all(report.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
