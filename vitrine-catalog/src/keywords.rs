//! Static keyword tables used to classify product names.
//!
//! All keys are lowercase. Tables of `(keyword, value)` pairs are evaluated in
//! declaration order and the first hit wins, so more specific keys must come
//! before the shorter keys they contain.

/// Name prefix → main category. Matched with `starts_with`.
pub const MAIN_CATEGORIES: &[(&str, &str)] = &[
    ("petit plateau", "Plateaux"),
    ("grand plateau", "Plateaux"),
    ("plateau", "Plateaux"),
    ("boîte cadeau", "Boîtes Cadeaux"),
    ("boite cadeau", "Boîtes Cadeaux"),
    ("boîte à chocolat", "Boîtes"),
    ("boîte", "Boîtes"),
    ("boite", "Boîtes"),
    ("coffret", "Coffrets"),
    ("bonbonnière", "Bonbonnières"),
    ("bonbonniere", "Bonbonnières"),
    ("corbeille", "Corbeilles"),
    ("panier", "Paniers"),
    ("présentoir", "Présentoirs"),
    ("presentoir", "Présentoirs"),
    ("tablette", "Chocolats"),
    ("chocolat", "Chocolats"),
    ("truffe", "Chocolats"),
    ("praline", "Chocolats"),
    ("dragée", "Dragées"),
    ("dragee", "Dragées"),
    ("table basse", "Tables"),
    ("table", "Tables"),
    ("console", "Tables"),
    ("chaise", "Sièges"),
    ("fauteuil", "Sièges"),
    ("tabouret", "Sièges"),
    ("pouf", "Sièges"),
    ("vase", "Vases"),
    ("bougeoir", "Bougeoirs"),
    ("photophore", "Bougeoirs"),
    ("miroir", "Miroirs"),
    ("cadre", "Cadres"),
    ("lampe", "Luminaires"),
    ("lanterne", "Luminaires"),
    ("coussin", "Textile"),
    ("plaid", "Textile"),
];

/// Category used when no prefix matches.
pub const DEFAULT_MAIN_CATEGORY: &str = "Accessoires";

/// Subcategory used when neither a material nor a descriptive fallback applies.
pub const DEFAULT_SUB_CATEGORY: &str = "Divers";

/// Material phrases used for subcategory detection. Matched with `contains`
/// after sorting by descending length.
pub const SUB_CATEGORY_MATERIALS: &[&str] = &[
    "en similicuir",
    "similicuir",
    "en cuir",
    "cuir",
    "en velours",
    "velours",
    "en bois massif",
    "bois massif",
    "en bois",
    "bois",
    "en métal doré",
    "métal doré",
    "en métal",
    "métal",
    "metal",
    "en verre",
    "verre",
    "en marbre",
    "marbre",
    "en laiton",
    "laiton",
    "en plexiglas",
    "plexiglas",
    "acrylique",
    "en rotin",
    "rotin",
    "en osier",
    "osier",
    "en céramique",
    "céramique",
    "en porcelaine",
    "porcelaine",
    "cristal",
    "en résine",
    "résine",
    "en carton",
    "carton",
    "doré",
    "argenté",
];

/// Known brands / collection names, in canonical spelling. Matched as whole
/// words.
pub const BRANDS: &[&str] = &[
    "Alice", "Louise", "Camille", "Jade", "Inès", "Sofia", "Yasmine", "Salma", "Rania", "Lina",
    "Victoria", "Chloé", "Godiva", "Lindt", "Neuhaus", "Leonidas", "Patchi", "Valrhona",
];

/// Shape keyword → canonical shape.
pub const SHAPES: &[(&str, &str)] = &[
    ("rectangulaire", "Rectangulaire"),
    ("carrée", "Carré"),
    ("carré", "Carré"),
    ("carre", "Carré"),
    ("ovale", "Ovale"),
    ("ronde", "Rond"),
    ("rond", "Rond"),
    ("cœur", "Cœur"),
    ("coeur", "Cœur"),
    ("hexagonal", "Hexagonal"),
    ("octogonal", "Octogonal"),
    ("triangulaire", "Triangulaire"),
    ("cylindrique", "Cylindrique"),
];

/// Material keyword → canonical material.
pub const MATERIALS: &[(&str, &str)] = &[
    ("similicuir", "Similicuir"),
    ("cuir", "Cuir"),
    ("velours", "Velours"),
    ("bois", "Bois"),
    ("métal", "Métal"),
    ("metal", "Métal"),
    ("verre", "Verre"),
    ("marbre", "Marbre"),
    ("laiton", "Laiton"),
    ("plexiglas", "Plexiglas"),
    ("acrylique", "Acrylique"),
    ("rotin", "Rotin"),
    ("osier", "Osier"),
    ("céramique", "Céramique"),
    ("ceramique", "Céramique"),
    ("porcelaine", "Porcelaine"),
    ("cristal", "Cristal"),
    ("résine", "Résine"),
    ("resine", "Résine"),
    ("carton", "Carton"),
];

/// Chocolate keyword → chocolate type.
pub const CHOCOLATE_TYPES: &[(&str, &str)] = &[
    ("chocolat noir", "Noir"),
    ("chocolat au lait", "Lait"),
    ("chocolat lait", "Lait"),
    ("chocolat blanc", "Blanc"),
    ("chocolat ruby", "Ruby"),
    ("praliné", "Praliné"),
    ("praline", "Praliné"),
    ("gianduja", "Gianduja"),
    ("ganache", "Ganache"),
    ("truffe", "Truffe"),
    ("caramel", "Caramel"),
];

/// Keyword → marketing tag.
pub const TAGS: &[(&str, &str)] = &[
    ("cadeau", "Cadeau"),
    ("coffret", "Cadeau"),
    ("mariage", "Mariage"),
    ("fiançailles", "Fiançailles"),
    ("fiancailles", "Fiançailles"),
    ("naissance", "Naissance"),
    ("baptême", "Naissance"),
    ("ramadan", "Ramadan"),
    ("aïd", "Aïd"),
    ("saint-valentin", "Saint-Valentin"),
    ("valentin", "Saint-Valentin"),
    ("noël", "Fêtes"),
    ("noel", "Fêtes"),
    ("luxe", "Luxe"),
    ("premium", "Premium"),
    ("artisanal", "Artisanal"),
    ("fait main", "Artisanal"),
    ("personnalisé", "Personnalisable"),
    ("personnalisable", "Personnalisable"),
];

pub const GIFT_BOX_KEYWORDS: &[&str] = &[
    "boîte cadeau",
    "boite cadeau",
    "coffret",
    "cadeau",
    "gift",
    "écrin",
    "ecrin",
];

pub const PREMIUM_KEYWORDS: &[&str] = &[
    "premium",
    "luxe",
    "luxueux",
    "prestige",
    "exclusif",
    "édition limitée",
    "edition limitee",
    "feuille d'or",
];
