//! Optimización de URLs de imágenes
//!
//! Transforma la URL de una imagen en una URL del servicio remoto de
//! optimización (images.weserv.nl). Nunca falla: ante cualquier entrada
//! inválida devuelve la imagen placeholder fija.

use serde::{Deserialize, Serialize};

/// Imagen fija para entradas inválidas o listas vacías
pub const PLACEHOLDER_IMAGE_URL: &str = "https://i.imgur.com/g2a4A0a.png";

/// Endpoint de optimización; espera la URL de origen sin esquema
pub const OPTIMIZER_BASE_URL: &str = "https://images.weserv.nl/?url=";

/// Parámetros de transformación, en el orden en que se agregan a la query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<u32>,
}

impl ImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, w: u32, h: u32) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    pub fn width(mut self, w: u32) -> Self {
        self.w = Some(w);
        self
    }

    pub fn fit(mut self, fit: &str) -> Self {
        self.fit = Some(fit.to_string());
        self
    }

    pub fn blur(mut self, blur: u32) -> Self {
        self.blur = Some(blur);
        self
    }

    pub fn output(mut self, output: &str) -> Self {
        self.output = Some(output.to_string());
        self
    }

    pub fn quality(mut self, q: u32) -> Self {
        self.q = Some(q);
        self
    }

    /// Serializar como query string (`w=100&h=80`)
    pub fn to_query(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        let mut push = |key: &str, value: String| {
            params.push(format!("{}={}", key, urlencoding::encode(&value)));
        };

        if let Some(w) = self.w {
            push("w", w.to_string());
        }
        if let Some(h) = self.h {
            push("h", h.to_string());
        }
        if let Some(fit) = &self.fit {
            push("fit", fit.clone());
        }
        if let Some(blur) = self.blur {
            push("blur", blur.to_string());
        }
        if let Some(output) = &self.output {
            push("output", output.clone());
        }
        if let Some(q) = self.q {
            push("q", q.to_string());
        }

        params.join("&")
    }
}

/// Quitar el esquema http(s) si la URL es válida
fn strip_http_scheme(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once("://")?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return None;
    }

    let parsed = reqwest::Url::parse(url).ok()?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return None;
    }
    Some(rest)
}

/// Construir la URL optimizada de una imagen
pub fn optimize_url(url: &str, options: &ImageOptions) -> String {
    let Some(clean_url) = strip_http_scheme(url) else {
        return PLACEHOLDER_IMAGE_URL.to_string();
    };

    let query = options.to_query();
    if query.is_empty() {
        format!("{}{}", OPTIMIZER_BASE_URL, clean_url)
    } else {
        format!("{}{}&{}", OPTIMIZER_BASE_URL, clean_url, query)
    }
}

/// Una variante del srcset (`url 600w`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SrcSetEntry {
    pub url: String,
    pub width: u32,
}

/// Juego de URLs para carga progresiva: placeholder borroso + variantes reales
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveImage {
    pub placeholder: String,
    pub src: String,
    pub srcset: Vec<SrcSetEntry>,
    pub sizes: &'static str,
}

impl ResponsiveImage {
    /// Atributo `srcset` listo para HTML
    pub fn srcset_attr(&self) -> String {
        self.srcset
            .iter()
            .map(|entry| format!("{} {}w", entry.url, entry.width))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Perfil de tamaños de un contexto de visualización
#[derive(Debug, Clone, Copy)]
pub struct ImageProfile {
    pub placeholder_size: (u32, u32),
    pub src_size: (u32, u32),
    pub breakpoints: &'static [u32],
    pub quality: u32,
    pub sizes: &'static str,
}

/// Tarjeta del catálogo
pub const CARD_PROFILE: ImageProfile = ImageProfile {
    placeholder_size: (20, 15),
    src_size: (800, 600),
    breakpoints: &[400, 600, 800, 1200],
    quality: 75,
    sizes: "(max-width: 767px) 100vw, (max-width: 1023px) 50vw, (max-width: 1279px) 33vw, 25vw",
};

/// Carrusel del detalle
pub const CAROUSEL_PROFILE: ImageProfile = ImageProfile {
    placeholder_size: (40, 30),
    src_size: (1200, 900),
    breakpoints: &[600, 800, 1200, 1600],
    quality: 80,
    sizes: "(max-width: 1279px) 60vw, 100vw",
};

impl ImageProfile {
    pub fn build(&self, url: &str) -> ResponsiveImage {
        let (pw, ph) = self.placeholder_size;
        let placeholder = optimize_url(
            url,
            &ImageOptions::new().size(pw, ph).fit("cover").blur(2).output("webp"),
        );

        let (sw, sh) = self.src_size;
        let src = optimize_url(
            url,
            &ImageOptions::new().size(sw, sh).fit("cover").output("webp").quality(self.quality),
        );

        let srcset = self
            .breakpoints
            .iter()
            .map(|&width| {
                let height = (f64::from(width) * 0.75).round() as u32;
                SrcSetEntry {
                    url: optimize_url(
                        url,
                        &ImageOptions::new()
                            .size(width, height)
                            .fit("cover")
                            .output("webp")
                            .quality(self.quality),
                    ),
                    width,
                }
            })
            .collect();

        ResponsiveImage {
            placeholder,
            src,
            srcset,
            sizes: self.sizes,
        }
    }
}

/// Miniatura de 80x64 para cada slot de imagen del formulario
pub fn thumbnail_url(url: &str) -> String {
    optimize_url(url, &ImageOptions::new().size(80, 64).fit("cover").output("webp"))
}
