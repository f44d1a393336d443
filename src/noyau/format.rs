// src/noyau/format.rs

/// Arrondi à 10 décimales : gomme le bruit de représentation binaire
/// (0.1 + 0.2 doit se lire 0.3, pas 0.30000000000000004).
///
/// Garde-fou : au-delà de ~1.7e298, `v * 1e10` déborde en infini ; dans ce
/// cas on renonce à l'arrondi et on garde la valeur telle quelle.
pub fn arrondi_10(v: f64) -> f64 {
    let r = (v * 1e10).round() / 1e10;
    if r.is_finite() {
        r
    } else {
        v
    }
}

/// Canonicalise une valeur finie en texte décimal.
///
/// `Display` de f64 donne déjà la plus courte écriture décimale qui
/// redonne la même valeur ("4" pour 4.0, "0.3" pour 0.3) — exactement le
/// texte qu'on veut réinjecter dans le tampon après un `=`.
pub fn format_resultat(v: f64) -> String {
    let r = arrondi_10(v);

    // -0.0 s'afficherait "-0"
    if r == 0.0 {
        return "0".to_string();
    }

    format!("{r}")
}
