use crate::domain::model::ProjectDetails;
use serde_json::{json, Value};

pub use crate::domain::model::GenerationRequest;

/// Builds the prompt/schema pair for a project. Callers must validate
/// the details first; this function never fails.
pub fn build_request(details: &ProjectDetails) -> GenerationRequest {
    GenerationRequest {
        prompt: build_prompt(details),
        schema: response_schema(),
    }
}

fn build_prompt(details: &ProjectDetails) -> String {
    let location = details.location.label();
    let markup = details.location.markup_percent();

    format!(
        r#"PERAN:
Anda adalah Senior Quantity Surveyor (QS) dan Ahli Teknik Sipil profesional yang berdomisili di Bali, Indonesia.

TUGAS:
Buatlah Rencana Anggaran Biaya (RAB) detail untuk proyek konstruksi berikut.

DATA PROYEK:
- Nama: {project_name}
- Lokasi: {location} (Bali)
- Luas Tanah: {land_area} m2
- Luas Bangunan: {building_area} m2
- Lantai: {floors}
- Tipe: {building_type}
- Kualitas Material: {quality}
- Catatan: {notes}

LANDASAN TEORITIS & REFERENSI HARGA (WAJIB):
1.  **Analisa:** Gunakan SNI 2835:2023 dan AHSP (Analisa Harga Satuan Pekerjaan) PUPR terbaru.
2.  **Harga Dasar (HSD):** Gunakan database harga pasar material dan upah riil di Bali saat ini (Contoh: Semen Gresik/Tiga Roda, Pasir Lumajang/Muntilan, Batu Kali lokal, Upah Tukang Bali).
3.  **Formula Dasar:** Harga Satuan Pekerjaan (HSP) = (Koefisien x Harga Satuan Bahan) + (Koefisien x Upah Tenaga) + (Koefisien x Harga Alat).

LOGIKA PERHITUNGAN BIAYA (STEP-BY-STEP):

1.  **Tentukan HSD Dasar:** Estimasi harga dasar material & upah.

2.  **Terapkan FAKTOR LOKASI (Location Adjustment):**
    - Jika Lokasi = "Badung" atau "Denpasar": Tambahkan markup **+10%** pada harga dasar (biaya hidup & logistik tinggi).
    - Jika Lokasi = "Gianyar" atau "Tabanan": Tambahkan markup **+5%**.
    - Jika Kabupaten lain (Bangli, Klungkung, Karangasem, Buleleng, Jembrana): **+0%** (Harga standar).
    - Untuk proyek ini (Lokasi: {location}), faktor lokasi yang berlaku adalah **+{markup}%**.

3.  **Tambahkan OVERHEAD & PROFIT:**
    - Tambahkan Margin Kontraktor sebesar **15%** (Overhead 5% + Profit 10%) ke dalam Harga Satuan Jadi.
    - Rumus Unit Price di JSON = (HSP Dasar x Faktor Lokasi) + 15%.

4.  **Hitung PAJAK (PPN):**
    - Total biaya fisik konstruksi = Sum(Volume x Unit Price).
    - Grand Total = Total Biaya Fisik + **PPN 11%**.

INSTRUKSI OUTPUT JSON:
1.  **Detail Item:** Breakdown pekerjaan harus mendetail sesuai tahapan konstruksi (Persiapan, Tanah, Pondasi, Beton, Dinding, Lantai, Atap, Plafon, Pintu/Jendela, Pengecatan, Sanitasi, Elektrikal).
2.  **Volume:** Hitung volume secara logis berdasarkan Luas Bangunan dan Jumlah Lantai.
    - *PENTING:* Untuk Dinding, Plafon, dan Lantai, gunakan rasio teknik sipil yang akurat terhadap luas bangunan, bukan angka acak.
3.  **Unit Price:** Pastikan harga satuan yang ditampilkan SUDAH termasuk Material, Upah, Alat, Faktor Lokasi, Overhead, dan Profit.
4.  **Project Summary:** Jelaskan secara naratif singkat:
    - Spesifikasi struktur utama.
    - **Asumsi Harga Utama:** Sebutkan harga Semen/sak dan Upah Tukang yang digunakan sebagai acuan perhitungan agar user bisa memvalidasi.
    - Persentase penyesuaian harga daerah yang diterapkan.

Format Output JSON harus sesuai skema berikut."#,
        project_name = details.project_name,
        location = location,
        land_area = details.land_area,
        building_area = details.building_area,
        floors = details.floors,
        building_type = details.effective_building_type(),
        quality = details.quality.label(),
        notes = details.notes,
        markup = markup,
    )
}

/// The Gemini response schema mirroring [`crate::domain::model::RabResult`].
/// All fields are mandatory; item and category order is significant.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "projectSummary": {
                "type": "STRING",
                "description": "Ringkasan teknis, asumsi harga material utama (Semen/Pasir) yang digunakan, dan faktor lokasi."
            },
            "estimatedDuration": {
                "type": "STRING",
                "description": "Estimasi waktu pengerjaan (contoh: 6 Bulan)."
            },
            "grandTotal": {
                "type": "NUMBER",
                "description": "Total biaya keseluruhan proyek (Termasuk PPN 11%)."
            },
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "categoryName": {
                            "type": "STRING",
                            "description": "Kategori (I. Pekerjaan Persiapan, II. Pekerjaan Tanah & Pondasi, dst)."
                        },
                        "subtotal": {
                            "type": "NUMBER",
                            "description": "Total biaya kategori ini."
                        },
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "description": { "type": "STRING", "description": "Uraian pekerjaan sesuai nomenklatur SNI/AHSP." },
                                    "unit": { "type": "STRING", "description": "Satuan (m2, m3, kg, bh, ls, unit)." },
                                    "volume": { "type": "NUMBER", "description": "Volume pekerjaan." },
                                    "unitPrice": { "type": "NUMBER", "description": "Harga Satuan Jadi (Termasuk Mat+Upah+Alat+Overhead+Profit)." },
                                    "totalPrice": { "type": "NUMBER", "description": "Total harga (Volume x Unit Price)." }
                                },
                                "required": ["description", "unit", "volume", "unitPrice", "totalPrice"]
                            }
                        }
                    },
                    "required": ["categoryName", "subtotal", "items"]
                }
            }
        },
        "required": ["projectSummary", "estimatedDuration", "grandTotal", "categories"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BuildingType, Location, MaterialQuality};

    fn villa_test_details() -> ProjectDetails {
        ProjectDetails {
            project_name: "Villa Test".to_string(),
            location: Location::Denpasar,
            land_area: 100.0,
            building_area: 60.0,
            floors: 1,
            building_type: BuildingType::Villa,
            custom_building_type: None,
            quality: MaterialQuality::Standard,
            notes: String::new(),
        }
    }

    #[test]
    fn test_prompt_embeds_all_project_fields() {
        let request = build_request(&villa_test_details());

        assert!(request.prompt.contains("Villa Test"));
        assert!(request.prompt.contains("Denpasar"));
        assert!(request.prompt.contains("Luas Tanah: 100 m2"));
        assert!(request.prompt.contains("Luas Bangunan: 60 m2"));
        assert!(request.prompt.contains("Lantai: 1"));
        assert!(request.prompt.contains("Villa Private/Komersial"));
        assert!(request.prompt.contains("Standar"));
    }

    #[test]
    fn test_prompt_states_applied_location_factor() {
        let request = build_request(&villa_test_details());
        assert!(request
            .prompt
            .contains("(Lokasi: Denpasar), faktor lokasi yang berlaku adalah **+10%**"));

        let mut details = villa_test_details();
        details.location = Location::Gianyar;
        let request = build_request(&details);
        assert!(request
            .prompt
            .contains("(Lokasi: Gianyar), faktor lokasi yang berlaku adalah **+5%**"));

        details.location = Location::Buleleng;
        let request = build_request(&details);
        assert!(request
            .prompt
            .contains("(Lokasi: Buleleng), faktor lokasi yang berlaku adalah **+0%**"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let details = villa_test_details();
        let first = build_request(&details);
        let second = build_request(&details);
        assert_eq!(first.prompt, second.prompt);
        assert_eq!(first.schema, second.schema);
    }

    #[test]
    fn test_prompt_uses_custom_building_type_for_other() {
        let mut details = villa_test_details();
        details.building_type = BuildingType::Other;
        details.custom_building_type = Some("Kandang Ayam Close House".to_string());

        let request = build_request(&details);
        assert!(request.prompt.contains("Tipe: Kandang Ayam Close House"));
        assert!(!request.prompt.contains("Lainnya (Custom)"));
    }

    #[test]
    fn test_schema_requires_every_field() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["projectSummary", "estimatedDuration", "grandTotal", "categories"]
        );

        let item_required = &schema["properties"]["categories"]["items"]["properties"]["items"]
            ["items"]["required"];
        assert_eq!(
            item_required.as_array().unwrap().len(),
            5,
            "every line-item field is mandatory"
        );
    }
}
