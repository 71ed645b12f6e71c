use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

/// Table backing the artwork records
pub const TABLE: &str = "artworks";

/// Descriptive columns in the order shared by the INSERT and UPDATE statements.
pub const DESCRIPTIVE_COLUMNS: [&str; 22] = [
    "rei", "ubi", "pro", "adq", "reg", "nom", "tit", "aut", "fec", "lug", "ico", "icc", "tip",
    "tec", "sop", "mat", "tin", "dim", "hue", "ins", "des", "est",
];

/// Every column, in table order
pub const ALL_COLUMNS: [&str; 24] = [
    "id", "rei", "created_at", "ubi", "pro", "adq", "reg", "nom", "tit", "aut", "fec", "lug",
    "ico", "icc", "tip", "tec", "sop", "mat", "tin", "dim", "hue", "ins", "des", "est",
];

/// An artwork record (title, author, provenance, etc.).
///
/// `id` is assigned by the store on insert and `created_at` by the server on
/// create; both are stable afterwards. Only the 22 descriptive fields change
/// on update. Missing JSON keys and `null` values decode to their zero value.
///
/// ```json
/// { "id": 1, "rei": "#elle", "created_at": 1489140631,
///   "pro": "Ayuntamiento de Mahón", "ubi": "Desconocido", ... }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artwork {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rei: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ubi: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pro: String,
    #[serde(deserialize_with = "null_as_default")]
    pub adq: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nom: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub aut: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fec: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ico: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tec: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sop: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mat: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dim: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hue: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ins: String,
    #[serde(deserialize_with = "null_as_default")]
    pub des: String,
    #[serde(deserialize_with = "null_as_default")]
    pub est: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Artwork {
    /// Descriptive values, aligned with `DESCRIPTIVE_COLUMNS`
    pub fn descriptive_values(&self) -> [&str; 22] {
        [
            self.rei.as_str(),
            self.ubi.as_str(),
            self.pro.as_str(),
            self.adq.as_str(),
            self.reg.as_str(),
            self.nom.as_str(),
            self.tit.as_str(),
            self.aut.as_str(),
            self.fec.as_str(),
            self.lug.as_str(),
            self.ico.as_str(),
            self.icc.as_str(),
            self.tip.as_str(),
            self.tec.as_str(),
            self.sop.as_str(),
            self.mat.as_str(),
            self.tin.as_str(),
            self.dim.as_str(),
            self.hue.as_str(),
            self.ins.as_str(),
            self.des.as_str(),
            self.est.as_str(),
        ]
    }

    /// Copy the descriptive fields of `other` onto `self`, keeping `id` and `created_at`.
    pub fn apply_descriptive(&mut self, other: &Artwork) {
        let Artwork { id, created_at, .. } = *self;
        *self = Artwork { id, created_at, ..other.clone() };
    }
}

// SQL NULL in a text column decodes as "".
impl<'r> FromRow<'r, PgRow> for Artwork {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let text = |column: &str| -> Result<String, sqlx::Error> {
            Ok(row.try_get::<Option<String>, _>(column)?.unwrap_or_default())
        };

        Ok(Artwork {
            id: row.try_get("id")?,
            rei: text("rei")?,
            created_at: row.try_get::<Option<i64>, _>("created_at")?.unwrap_or_default(),
            ubi: text("ubi")?,
            pro: text("pro")?,
            adq: text("adq")?,
            reg: text("reg")?,
            nom: text("nom")?,
            tit: text("tit")?,
            aut: text("aut")?,
            fec: text("fec")?,
            lug: text("lug")?,
            ico: text("ico")?,
            icc: text("icc")?,
            tip: text("tip")?,
            tec: text("tec")?,
            sop: text("sop")?,
            mat: text("mat")?,
            tin: text("tin")?,
            dim: text("dim")?,
            hue: text("hue")?,
            ins: text("ins")?,
            des: text("des")?,
            est: text("est")?,
        })
    }
}
