//! Static reference catalogs: the Ballpark seed tree, the Estimates delta
//! tables and the Detail extension rules.
//!
//! These are immutable constants injected into derivation calls, never
//! module-level mutable state. Base prices are per-m² IDR figures by building
//! class (columns A–D).

/// `(code, name_en, name_id, unit, [class A..D base prices per m²])`
pub type SeedRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    [f64; 4],
);

/// `(root code, name_en, name_id, leaf rows)`
pub type SeedDiscipline = (&'static str, &'static str, &'static str, &'static [SeedRow]);

/// `(ballpark leaf code, child items as (name_en, name_id, unit))`
pub type DeltaRow = (
    &'static str,
    &'static [(&'static str, &'static str, &'static str)],
);

/// `(name_en, name_id, unit, optional L5 children as (name_en, name_id, unit))`
pub type DetailRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static [(&'static str, &'static str, &'static str)],
);

const STRUCTURE_ROWS: &[SeedRow] = &[
    (
        "S.1",
        "Foundation works",
        "Pekerjaan pondasi",
        "m2",
        [1_150_000.0, 980_000.0, 820_000.0, 640_000.0],
    ),
    (
        "S.2",
        "Lower structure",
        "Struktur bawah",
        "m2",
        [1_480_000.0, 1_260_000.0, 1_050_000.0, 860_000.0],
    ),
    (
        "S.3",
        "Upper structure",
        "Struktur atas",
        "m2",
        [2_250_000.0, 1_920_000.0, 1_580_000.0, 1_240_000.0],
    ),
];

const ARCHITECTURE_ROWS: &[SeedRow] = &[
    (
        "A.1",
        "Walls and finishes",
        "Dinding dan finishing",
        "m2",
        [1_650_000.0, 1_380_000.0, 1_120_000.0, 890_000.0],
    ),
    (
        "A.2",
        "Doors and windows",
        "Pintu dan jendela",
        "m2",
        [720_000.0, 610_000.0, 500_000.0, 390_000.0],
    ),
    (
        "A.3",
        "Roof works",
        "Pekerjaan atap",
        "m2",
        [880_000.0, 740_000.0, 610_000.0, 480_000.0],
    ),
];

const MEP_ROWS: &[SeedRow] = &[
    (
        "M.1",
        "Electrical installation",
        "Instalasi listrik",
        "m2",
        [950_000.0, 800_000.0, 660_000.0, 520_000.0],
    ),
    (
        "M.2",
        "Plumbing and sanitary",
        "Plambing dan sanitasi",
        "m2",
        [680_000.0, 570_000.0, 470_000.0, 370_000.0],
    ),
    (
        "M.3",
        "Mechanical and HVAC",
        "Mekanikal dan tata udara",
        "m2",
        [1_250_000.0, 1_040_000.0, 850_000.0, 660_000.0],
    ),
];

const INTERIOR_ROWS: &[SeedRow] = &[
    (
        "I.1",
        "Interior fit-out",
        "Fit-out interior",
        "m2",
        [1_350_000.0, 1_120_000.0, 910_000.0, 710_000.0],
    ),
    (
        "I.2",
        "Loose furniture",
        "Furnitur lepas",
        "m2",
        [540_000.0, 450_000.0, 360_000.0, 280_000.0],
    ),
];

const LANDSCAPE_ROWS: &[SeedRow] = &[
    (
        "L.1",
        "Hardscape",
        "Perkerasan taman",
        "m2",
        [420_000.0, 350_000.0, 290_000.0, 230_000.0],
    ),
    (
        "L.2",
        "Softscape",
        "Penanaman",
        "m2",
        [260_000.0, 220_000.0, 180_000.0, 140_000.0],
    ),
];

/// Fixed S/A/M block; always present, always positions 0–2, in this order.
pub const FIXED_DISCIPLINES: &[SeedDiscipline] = &[
    ("S", "Structure", "Struktur", STRUCTURE_ROWS),
    ("A", "Architecture", "Arsitektur", ARCHITECTURE_ROWS),
    ("M", "MEP", "Mekanikal Elektrikal Plambing", MEP_ROWS),
];

/// Optional addon disciplines, inserted after the SAM/addon block.
pub const INTERIOR_ADDON: SeedDiscipline = ("I", "Interior", "Interior", INTERIOR_ROWS);
pub const LANDSCAPE_ADDON: SeedDiscipline = ("L", "Landscape", "Lanskap", LANDSCAPE_ROWS);

/// Estimates delta table: one additional level beneath each Ballpark leaf.
pub const ESTIMATE_DELTAS: &[DeltaRow] = &[
    (
        "S.1",
        &[
            ("Excavation", "Galian tanah", "m3"),
            ("Pile works", "Pekerjaan tiang pancang", "m"),
            ("Pile caps and tie beams", "Pile cap dan sloof", "m3"),
        ],
    ),
    (
        "S.2",
        &[
            ("Basement retaining walls", "Dinding penahan basement", "m3"),
            ("Ground floor slab", "Pelat lantai dasar", "m3"),
        ],
    ),
    (
        "S.3",
        &[
            ("Columns", "Kolom", "m3"),
            ("Beams", "Balok", "m3"),
            ("Floor slabs", "Pelat lantai", "m3"),
            ("Stairs", "Tangga", "m3"),
        ],
    ),
    (
        "A.1",
        &[
            ("Masonry walls", "Dinding pasangan bata", "m2"),
            ("Plaster and render", "Plesteran dan acian", "m2"),
            ("Floor finishes", "Finishing lantai", "m2"),
            ("Painting", "Pengecatan", "m2"),
        ],
    ),
    (
        "A.2",
        &[
            ("Door sets", "Kusen dan daun pintu", "unit"),
            ("Window sets", "Kusen dan daun jendela", "unit"),
            ("Ironmongery", "Aksesori pintu jendela", "set"),
        ],
    ),
    (
        "A.3",
        &[
            ("Roof structure", "Rangka atap", "m2"),
            ("Roof covering", "Penutup atap", "m2"),
            ("Gutters and flashing", "Talang dan flashing", "m"),
        ],
    ),
    (
        "M.1",
        &[
            ("Distribution panels", "Panel distribusi", "unit"),
            ("Wiring and conduits", "Instalasi kabel", "titik"),
            ("Lighting fixtures", "Armatur penerangan", "titik"),
        ],
    ),
    (
        "M.2",
        &[
            ("Clean water piping", "Pipa air bersih", "m"),
            ("Waste water piping", "Pipa air kotor", "m"),
            ("Sanitary fixtures", "Sanitair", "unit"),
        ],
    ),
    (
        "M.3",
        &[
            ("Air conditioning units", "Unit tata udara", "unit"),
            ("Ducting", "Saluran udara", "m2"),
            ("Ventilation fans", "Kipas ventilasi", "unit"),
        ],
    ),
    (
        "I.1",
        &[
            ("Partitions", "Partisi", "m2"),
            ("Ceiling works", "Pekerjaan plafon", "m2"),
            ("Built-in joinery", "Furnitur terpasang", "m"),
        ],
    ),
    (
        "I.2",
        &[
            ("Seating", "Kursi dan sofa", "unit"),
            ("Tables and desks", "Meja", "unit"),
        ],
    ),
    (
        "L.1",
        &[
            ("Paving", "Perkerasan", "m2"),
            ("Drainage channels", "Saluran drainase", "m"),
        ],
    ),
    (
        "L.2",
        &[
            ("Planting", "Penanaman", "m2"),
            ("Irrigation", "Irigasi", "titik"),
        ],
    ),
];

const STRUCTURE_DETAIL: &[DetailRow] = &[
    ("Preparation", "Persiapan", "ls", &[]),
    (
        "Main works",
        "Pekerjaan utama",
        "ls",
        &[
            ("Material", "Bahan", "ls"),
            ("Labor", "Upah", "oh"),
        ],
    ),
    ("Finishing", "Penyelesaian", "ls", &[]),
];

const ARCHITECTURE_DETAIL: &[DetailRow] = &[
    ("Material supply", "Pengadaan material", "ls", &[]),
    (
        "Installation",
        "Pemasangan",
        "ls",
        &[
            ("Labor", "Upah", "oh"),
            ("Equipment", "Alat bantu", "unit"),
        ],
    ),
];

const MEP_DETAIL: &[DetailRow] = &[
    ("Equipment supply", "Pengadaan peralatan", "ls", &[]),
    (
        "Installation and testing",
        "Pemasangan dan pengujian",
        "ls",
        &[
            ("Installation", "Pemasangan", "ls"),
            ("Testing and commissioning", "Pengujian dan komisioning", "ls"),
        ],
    ),
];

const DEFAULT_DETAIL: &[DetailRow] = &[
    ("Material supply", "Pengadaan material", "ls", &[]),
    ("Installation", "Pemasangan", "ls", &[]),
];

/// Detail extension rule for a discipline root code.
#[must_use]
pub fn detail_extension_for(root_code: &str) -> &'static [DetailRow] {
    match root_code {
        "S" => STRUCTURE_DETAIL,
        "A" => ARCHITECTURE_DETAIL,
        "M" => MEP_DETAIL,
        _ => DEFAULT_DETAIL,
    }
}

/// Child items the Estimates derivation adds beneath one Ballpark leaf.
#[must_use]
pub fn estimate_delta_for(
    deltas: &[DeltaRow],
    leaf_code: &str,
) -> &'static [(&'static str, &'static str, &'static str)] {
    deltas
        .iter()
        .find(|(code, _)| *code == leaf_code)
        .map_or(&[], |(_, children)| children)
}
