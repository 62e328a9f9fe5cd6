//! Carrusel de imágenes
//!
//! Recorre una lista ordenada de URLs con navegación circular. El estado de
//! carga se asocia al par (índice, URL) visible, de modo que la carga tardía
//! de una imagen anterior nunca marca como cargada a la actual.

use serde::Serialize;
use tracing::debug;

use crate::utils::image::{ResponsiveImage, CAROUSEL_PROFILE};

#[derive(Debug, Clone, Default)]
pub struct ImageCarousel {
    images: Vec<String>,
    current: usize,
    loaded: Option<(usize, String)>,
}

/// Lo que hay que dibujar en este momento
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarouselFrame {
    /// Lista vacía: "No Image"
    Empty,
    Image(ImageFrame),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageFrame {
    pub index: usize,
    pub total: usize,
    pub url: String,
    pub alt: String,
    pub image: ResponsiveImage,
    pub loaded: bool,
    /// Flechas e indicadores solo con más de una imagen
    pub show_controls: bool,
    pub indicators: Vec<bool>,
}

impl ImageCarousel {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            current: 0,
            loaded: None,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    /// Reemplazar la lista (p.ej. al recalcular la vista previa)
    pub fn set_images(&mut self, images: Vec<String>) {
        if images == self.images {
            return;
        }
        self.images = images;
        if self.current >= self.images.len() {
            self.current = 0;
        }
        self.loaded = None;
    }

    fn select(&mut self, index: usize) {
        if index != self.current {
            debug!("🖼️ Carrusel: {} -> {}", self.current, index);
        }
        self.current = index;
        self.loaded = None;
    }

    pub fn next(&mut self) {
        if self.images.is_empty() {
            return;
        }
        let index = if self.current + 1 >= self.images.len() { 0 } else { self.current + 1 };
        self.select(index);
    }

    pub fn previous(&mut self) {
        if self.images.is_empty() {
            return;
        }
        let index = if self.current == 0 { self.images.len() - 1 } else { self.current - 1 };
        self.select(index);
    }

    /// Saltar a un índice (indicadores); fuera de rango no hace nada
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.select(index);
        true
    }

    /// Notificar que terminó de cargar `url` mostrada en `index`.
    /// Solo se aplica si sigue siendo la imagen visible.
    pub fn mark_loaded(&mut self, index: usize, url: &str) -> bool {
        if index != self.current || self.current_image() != Some(url) {
            return false;
        }
        self.loaded = Some((index, url.to_string()));
        true
    }

    pub fn is_loaded(&self) -> bool {
        match (&self.loaded, self.current_image()) {
            (Some((index, url)), Some(current)) => *index == self.current && url == current,
            _ => false,
        }
    }

    pub fn frame(&self) -> CarouselFrame {
        let Some(url) = self.current_image() else {
            return CarouselFrame::Empty;
        };

        let total = self.images.len();
        CarouselFrame::Image(ImageFrame {
            index: self.current,
            total,
            url: url.to_string(),
            alt: format!("Vehicle image {}", self.current + 1),
            image: CAROUSEL_PROFILE.build(url),
            loaded: self.is_loaded(),
            show_controls: total > 1,
            indicators: (0..total).map(|i| i == self.current).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> ImageCarousel {
        ImageCarousel::new((0..n).map(|i| format!("https://x.test/{i}.jpg")).collect())
    }

    #[test]
    fn test_empty_carousel() {
        let mut c = carousel(0);
        c.next();
        c.previous();
        assert_eq!(c.frame(), CarouselFrame::Empty);
        assert!(!c.go_to(0));
    }

    #[test]
    fn test_next_wraps_around() {
        for n in 1..6 {
            let mut c = carousel(n);
            for _ in 0..n {
                c.next();
            }
            assert_eq!(c.current_index(), 0);
        }
    }

    #[test]
    fn test_previous_from_first_goes_to_last() {
        let mut c = carousel(4);
        c.previous();
        assert_eq!(c.current_index(), 3);
        c.next();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_navigation_resets_loaded() {
        let mut c = carousel(3);
        assert!(c.mark_loaded(0, "https://x.test/0.jpg"));
        assert!(c.is_loaded());

        c.next();
        assert!(!c.is_loaded());
        c.go_to(0);
        assert!(!c.is_loaded());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut c = carousel(3);
        c.next();
        assert!(!c.mark_loaded(0, "https://x.test/0.jpg"));
        assert!(!c.is_loaded());
        assert!(c.mark_loaded(1, "https://x.test/1.jpg"));
        assert!(c.is_loaded());
    }

    #[test]
    fn test_controls_only_with_several_images() {
        let CarouselFrame::Image(single) = carousel(1).frame() else {
            panic!("esperaba imagen");
        };
        assert!(!single.show_controls);

        let mut c = carousel(3);
        c.go_to(2);
        let CarouselFrame::Image(frame) = c.frame() else {
            panic!("esperaba imagen");
        };
        assert!(frame.show_controls);
        assert_eq!(frame.indicators, vec![false, false, true]);
        assert_eq!(frame.alt, "Vehicle image 3");
        assert!(frame.image.placeholder.contains("w=40&h=30"));
        assert_eq!(frame.image.srcset.len(), 4);
    }

    #[test]
    fn test_set_images_clamps_index() {
        let mut c = carousel(3);
        c.go_to(2);
        c.set_images(vec!["https://x.test/a.jpg".into()]);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current_image(), Some("https://x.test/a.jpg"));
    }
}
