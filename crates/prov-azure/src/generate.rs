//! Generación de nombres, identificadores y contraseñas.
//!
//! Funciones puras sin IO. Forma determinista, valor aleatorio. Los
//! identificadores son de longitud fija y sólo llevan minúsculas y dígitos
//! (empiezan siempre por letra para ser nombres de rol válidos sin comillas).
//! Las contraseñas cumplen la regla de complejidad de la plataforma: al menos
//! tres de las cuatro categorías de caracteres; aquí se incluyen las cuatro.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

pub const IDENTIFIER_LENGTH: usize = 10;
pub const PASSWORD_LENGTH: usize = 16;

const LOWER_ALPHA_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER_ALPHA_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBER_CHARS: &[u8] = b"0123456789";
// Sin comillas, barra invertida, '@' ni '$': el valor viaja en cadenas de
// conexión y parámetros de plantilla.
const SPECIAL_CHARS: &[u8] = b"!#%^*()-_=+[]{}:,.?";
const IDENTIFIER_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 128;

fn pick<R: Rng + ?Sized>(rng: &mut R, set: &[u8]) -> char {
    set[rng.gen_range(0..set.len())] as char
}

/// Nombre único para grupos de recursos, despliegues y servidores.
pub fn new_resource_name() -> String {
    Uuid::new_v4().to_string()
}

/// Identificador de `IDENTIFIER_LENGTH` caracteres `[a-z][a-z0-9]*`.
pub fn new_identifier() -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(IDENTIFIER_LENGTH);
    out.push(pick(&mut rng, LOWER_ALPHA_CHARS));
    while out.len() < IDENTIFIER_LENGTH {
        out.push(pick(&mut rng, IDENTIFIER_CHARS));
    }
    out
}

/// Contraseña de administrador de `PASSWORD_LENGTH` caracteres.
pub fn new_password() -> String {
    let mut rng = rand::thread_rng();
    let mut chars = vec![pick(&mut rng, LOWER_ALPHA_CHARS),
                         pick(&mut rng, UPPER_ALPHA_CHARS),
                         pick(&mut rng, NUMBER_CHARS),
                         pick(&mut rng, SPECIAL_CHARS)];
    let all = [LOWER_ALPHA_CHARS, UPPER_ALPHA_CHARS, NUMBER_CHARS, SPECIAL_CHARS].concat();
    while chars.len() < PASSWORD_LENGTH {
        chars.push(pick(&mut rng, &all));
    }
    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}

pub fn is_identifier(s: &str) -> bool {
    s.len() == IDENTIFIER_LENGTH
    && s.starts_with(|c: char| c.is_ascii_lowercase())
    && s.bytes().all(|b| IDENTIFIER_CHARS.contains(&b))
}

pub fn meets_password_complexity(password: &str) -> bool {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&len) {
        return false;
    }
    let categories = [password.chars().any(|c| c.is_ascii_lowercase()),
                      password.chars().any(|c| c.is_ascii_uppercase()),
                      password.chars().any(|c| c.is_ascii_digit()),
                      password.chars().any(|c| !c.is_ascii_alphanumeric())];
    categories.iter().filter(|present| **present).count() >= 3
}
