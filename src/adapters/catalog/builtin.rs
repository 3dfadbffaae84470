//! Built-in catalog compiled into the binary.
//!
//! Portuguese, English and Spanish menus and system strings, built once per
//! process on first use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::catalog::{Language, MenuEntry, Texts};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CatalogLoader;

const LANGUAGE_MENU: &str = "Olá! 👋 Escolha seu idioma / Choose your language / Elija su idioma:\n\
1 - Português\n\
2 - English\n\
3 - Español";

struct Localized {
    texts: Arc<Texts>,
    menu: Arc<Vec<MenuEntry>>,
}

static CATALOG: Lazy<HashMap<Language, Localized>> = Lazy::new(|| {
    Language::ALL
        .into_iter()
        .map(|language| {
            let localized = Localized {
                texts: Arc::new(texts_for(language)),
                menu: Arc::new(menu_for(language)),
            };
            (language, localized)
        })
        .collect()
});

/// Catalog served from compiled-in content.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Texts for a language, straight from the compiled-in table.
    pub fn texts(language: Language) -> Option<Arc<Texts>> {
        CATALOG.get(&language).map(|l| Arc::clone(&l.texts))
    }

    /// Menu for a language, straight from the compiled-in table.
    pub fn menu(language: Language) -> Option<Arc<Vec<MenuEntry>>> {
        CATALOG.get(&language).map(|l| Arc::clone(&l.menu))
    }
}

fn unavailable(language: Language) -> DomainError {
    DomainError::new(ErrorCode::CatalogUnavailable, "No built-in catalog for language")
        .with_detail("language", language.code())
}

#[async_trait]
impl CatalogLoader for BuiltinCatalog {
    async fn load_menu(&self, language: Language) -> Result<Arc<Vec<MenuEntry>>, DomainError> {
        Self::menu(language).ok_or_else(|| unavailable(language))
    }

    async fn load_texts(&self, language: Language) -> Result<Arc<Texts>, DomainError> {
        Self::texts(language).ok_or_else(|| unavailable(language))
    }
}

fn menu_for(language: Language) -> Vec<MenuEntry> {
    let labels: [&str; 6] = match language {
        Language::Pt => [
            "Hotéis",
            "Restaurantes",
            "Pontos turísticos",
            "Avaliar o atendimento",
            "Trocar idioma",
            "Sair",
        ],
        Language::En => [
            "Hotels",
            "Restaurants",
            "Attractions",
            "Rate our service",
            "Change language",
            "Exit",
        ],
        Language::Es => [
            "Hoteles",
            "Restaurantes",
            "Atracciones turísticas",
            "Evaluar la atención",
            "Cambiar idioma",
            "Salir",
        ],
    };
    [1u8, 2, 3, 4, 5, 0]
        .into_iter()
        .zip(labels)
        .map(|(option, label)| MenuEntry::new(option, label))
        .collect()
}

fn texts_for(language: Language) -> Texts {
    match language {
        Language::Pt => Texts {
            language_menu: LANGUAGE_MENU.into(),
            welcome: "Bem-vindo(a), {name}! Eu sou o guia turístico da cidade e vou te ajudar a encontrar hotéis, restaurantes e pontos turísticos.".into(),
            main_menu_header: "Como posso ajudar? Digite o número da opção:".into(),
            invalid_option: "Opção inválida. Por favor, escolha uma das opções abaixo.".into(),
            item_not_found: "Nenhum resultado encontrado nesta categoria.".into(),
            feedback_prompt: "Como você avalia nosso atendimento? Responda com uma nota de 1 a 5.".into(),
            feedback_confirmation: "Obrigado pela sua avaliação! Envie qualquer mensagem para começar de novo.".into(),
            generic_error: "Desculpe, ocorreu um erro. Tente novamente em instantes.".into(),
            goodbye: "Até logo! Envie qualquer mensagem quando quiser conversar de novo.".into(),
            list_header: "Aqui estão alguns {category}:".into(),
            choose_item_hint: "Digite o número para ver os detalhes.".into(),
            see_more_option: "6 - Ver mais".into(),
            go_back_option: "7 - Voltar".into(),
            main_menu_option: "0 - Menu principal".into(),
            address_label: "Endereço".into(),
            phone_label: "Telefone".into(),
            rating_label: "Nota".into(),
            reviews_label: "avaliações".into(),
            map_label: "Mapa".into(),
            hotels: "hotéis".into(),
            restaurants: "restaurantes".into(),
            attractions: "pontos turísticos".into(),
        },
        Language::En => Texts {
            language_menu: LANGUAGE_MENU.into(),
            welcome: "Welcome, {name}! I am the city's tourist guide and I will help you find hotels, restaurants and attractions.".into(),
            main_menu_header: "How can I help? Type the option number:".into(),
            invalid_option: "Invalid option. Please choose one of the options below.".into(),
            item_not_found: "No results found in this category.".into(),
            feedback_prompt: "How would you rate our service? Reply with a score from 1 to 5.".into(),
            feedback_confirmation: "Thank you for your rating! Send any message to start again.".into(),
            generic_error: "Sorry, something went wrong. Please try again shortly.".into(),
            goodbye: "Goodbye! Send any message whenever you want to chat again.".into(),
            list_header: "Here are some {category}:".into(),
            choose_item_hint: "Type a number to see the details.".into(),
            see_more_option: "6 - See more".into(),
            go_back_option: "7 - Go back".into(),
            main_menu_option: "0 - Main menu".into(),
            address_label: "Address".into(),
            phone_label: "Phone".into(),
            rating_label: "Rating".into(),
            reviews_label: "reviews".into(),
            map_label: "Map".into(),
            hotels: "hotels".into(),
            restaurants: "restaurants".into(),
            attractions: "attractions".into(),
        },
        Language::Es => Texts {
            language_menu: LANGUAGE_MENU.into(),
            welcome: "¡Bienvenido(a), {name}! Soy el guía turístico de la ciudad y te ayudaré a encontrar hoteles, restaurantes y atracciones.".into(),
            main_menu_header: "¿Cómo puedo ayudarte? Escribe el número de la opción:".into(),
            invalid_option: "Opción inválida. Por favor, elige una de las opciones a continuación.".into(),
            item_not_found: "No se encontraron resultados en esta categoría.".into(),
            feedback_prompt: "¿Cómo evalúas nuestra atención? Responde con una nota del 1 al 5.".into(),
            feedback_confirmation: "¡Gracias por tu evaluación! Envía cualquier mensaje para empezar de nuevo.".into(),
            generic_error: "Lo sentimos, ocurrió un error. Inténtalo de nuevo en unos instantes.".into(),
            goodbye: "¡Hasta luego! Envía cualquier mensaje cuando quieras volver a conversar.".into(),
            list_header: "Aquí tienes algunos {category}:".into(),
            choose_item_hint: "Escribe el número para ver los detalles.".into(),
            see_more_option: "6 - Ver más".into(),
            go_back_option: "7 - Volver".into(),
            main_menu_option: "0 - Menú principal".into(),
            address_label: "Dirección".into(),
            phone_label: "Teléfono".into(),
            rating_label: "Nota".into(),
            reviews_label: "reseñas".into(),
            map_label: "Mapa".into(),
            hotels: "hoteles".into(),
            restaurants: "restaurantes".into(),
            attractions: "atracciones".into(),
        },
    }
}
