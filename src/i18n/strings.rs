//! Localized user-facing strings, one static table per language.
//!
//! Keys are dotted paths grouped by where the text appears. Placeholders
//! use `{name}` syntax and are filled by `Localization::translate_with`.

use crate::i18n::registry::StringTable;

// ==================== Portuguese Strings ====================

/// Portuguese strings (default language)
pub const PORTUGUESE_STRINGS: StringTable = &[
    // Navigation
    ("nav.menu", "Menu"),
    ("nav.gallery", "Galeria"),
    ("nav.reservations", "Reservas"),
    ("nav.events", "Eventos"),
    ("nav.about", "Sobre Nós"),
    ("nav.reviews", "Opiniões"),
    ("nav.contact", "Contacto"),
    // Contact form
    ("form.name", "Nome"),
    ("form.email", "Email"),
    ("form.phone", "Telefone (opcional)"),
    ("form.subject", "Assunto"),
    ("form.message", "Mensagem"),
    ("form.submit", "Enviar Mensagem"),
    ("form.submitting", "A enviar..."),
    // Validation
    ("validation.required", "Este campo é obrigatório"),
    ("validation.too_short", "Deve ter pelo menos {min} caracteres"),
    ("validation.too_long", "Deve ter no máximo {max} caracteres"),
    ("validation.invalid_characters", "Foram detetados caracteres inválidos"),
    ("validation.name.pattern", "O nome só pode conter letras, espaços, hífens e apóstrofos"),
    ("validation.email.pattern", "Introduza um endereço de email válido"),
    ("validation.phone.pattern", "Introduza um número de telefone válido"),
    ("validation.subject.pattern", "O assunto contém caracteres não permitidos"),
    ("validation.message.pattern", "A mensagem contém caracteres não permitidos"),
    ("validation.form_invalid", "Corrija os campos assinalados"),
    // Toasts
    ("toast.success.title", "Mensagem enviada!"),
    ("toast.success.description", "Obrigado pelo contacto. Responderemos brevemente."),
    ("toast.error.title", "Erro ao enviar"),
    ("toast.error.description", "Não foi possível enviar a mensagem. Tente novamente."),
    // Cookie consent
    ("consent.title", "Utilizamos cookies"),
    ("consent.description", "Usamos cookies essenciais e, com a sua autorização, cookies de análise e de preferências."),
    ("consent.accept_all", "Aceitar todos"),
    ("consent.reject_all", "Apenas essenciais"),
    ("consent.essential", "Essenciais"),
    ("consent.analytics", "Análise"),
    ("consent.preferences", "Preferências"),
    // Theme
    ("theme.light", "Modo claro"),
    ("theme.dark", "Modo escuro"),
];

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: StringTable = &[
    // Navigation
    ("nav.menu", "Menu"),
    ("nav.gallery", "Gallery"),
    ("nav.reservations", "Reservations"),
    ("nav.events", "Events"),
    ("nav.about", "About Us"),
    ("nav.reviews", "Reviews"),
    ("nav.contact", "Contact"),
    // Contact form
    ("form.name", "Name"),
    ("form.email", "Email"),
    ("form.phone", "Phone (optional)"),
    ("form.subject", "Subject"),
    ("form.message", "Message"),
    ("form.submit", "Send Message"),
    ("form.submitting", "Sending..."),
    // Validation
    ("validation.required", "This field is required"),
    ("validation.too_short", "Must be at least {min} characters"),
    ("validation.too_long", "Must be at most {max} characters"),
    ("validation.invalid_characters", "Invalid characters detected"),
    ("validation.name.pattern", "Name can only contain letters, spaces, hyphens and apostrophes"),
    ("validation.email.pattern", "Please enter a valid email address"),
    ("validation.phone.pattern", "Please enter a valid phone number"),
    ("validation.subject.pattern", "Subject contains characters that are not allowed"),
    ("validation.message.pattern", "Message contains characters that are not allowed"),
    ("validation.form_invalid", "Please correct the highlighted fields"),
    // Toasts
    ("toast.success.title", "Message sent!"),
    ("toast.success.description", "Thank you for reaching out. We will reply shortly."),
    ("toast.error.title", "Could not send"),
    ("toast.error.description", "Your message could not be sent. Please try again."),
    // Cookie consent
    ("consent.title", "We use cookies"),
    ("consent.description", "We use essential cookies and, with your permission, analytics and preference cookies."),
    ("consent.accept_all", "Accept all"),
    ("consent.reject_all", "Essential only"),
    ("consent.essential", "Essential"),
    ("consent.analytics", "Analytics"),
    ("consent.preferences", "Preferences"),
    // Theme
    ("theme.light", "Light mode"),
    ("theme.dark", "Dark mode"),
];

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: StringTable = &[
    // Navigation
    ("nav.menu", "Carta"),
    ("nav.gallery", "Galería"),
    ("nav.reservations", "Reservas"),
    ("nav.events", "Eventos"),
    ("nav.about", "Sobre Nosotros"),
    ("nav.reviews", "Opiniones"),
    ("nav.contact", "Contacto"),
    // Contact form
    ("form.name", "Nombre"),
    ("form.email", "Correo electrónico"),
    ("form.phone", "Teléfono (opcional)"),
    ("form.subject", "Asunto"),
    ("form.message", "Mensaje"),
    ("form.submit", "Enviar Mensaje"),
    ("form.submitting", "Enviando..."),
    // Validation
    ("validation.required", "Este campo es obligatorio"),
    ("validation.too_short", "Debe tener al menos {min} caracteres"),
    ("validation.too_long", "Debe tener como máximo {max} caracteres"),
    ("validation.invalid_characters", "Se han detectado caracteres no válidos"),
    ("validation.name.pattern", "El nombre solo puede contener letras, espacios, guiones y apóstrofos"),
    ("validation.email.pattern", "Introduce un correo electrónico válido"),
    ("validation.phone.pattern", "Introduce un número de teléfono válido"),
    ("validation.subject.pattern", "El asunto contiene caracteres no permitidos"),
    ("validation.message.pattern", "El mensaje contiene caracteres no permitidos"),
    ("validation.form_invalid", "Corrige los campos señalados"),
    // Toasts
    ("toast.success.title", "¡Mensaje enviado!"),
    ("toast.success.description", "Gracias por escribirnos. Te responderemos pronto."),
    ("toast.error.title", "Error al enviar"),
    ("toast.error.description", "No se pudo enviar el mensaje. Inténtalo de nuevo."),
    // Cookie consent
    ("consent.title", "Usamos cookies"),
    ("consent.description", "Usamos cookies esenciales y, con tu permiso, cookies de análisis y de preferencias."),
    ("consent.accept_all", "Aceptar todas"),
    ("consent.reject_all", "Solo esenciales"),
    ("consent.essential", "Esenciales"),
    ("consent.analytics", "Análisis"),
    ("consent.preferences", "Preferencias"),
    // Theme
    ("theme.light", "Modo claro"),
    ("theme.dark", "Modo oscuro"),
];

// ==================== French Strings ====================

pub const FRENCH_STRINGS: StringTable = &[
    // Navigation
    ("nav.menu", "Carte"),
    ("nav.gallery", "Galerie"),
    ("nav.reservations", "Réservations"),
    ("nav.events", "Événements"),
    ("nav.about", "À Propos"),
    ("nav.reviews", "Avis"),
    ("nav.contact", "Contact"),
    // Contact form
    ("form.name", "Nom"),
    ("form.email", "E-mail"),
    ("form.phone", "Téléphone (facultatif)"),
    ("form.subject", "Objet"),
    ("form.message", "Message"),
    ("form.submit", "Envoyer le Message"),
    ("form.submitting", "Envoi en cours..."),
    // Validation
    ("validation.required", "Ce champ est obligatoire"),
    ("validation.too_short", "Doit contenir au moins {min} caractères"),
    ("validation.too_long", "Doit contenir au plus {max} caractères"),
    ("validation.invalid_characters", "Caractères non valides détectés"),
    ("validation.name.pattern", "Le nom ne peut contenir que des lettres, des espaces, des traits d'union et des apostrophes"),
    ("validation.email.pattern", "Veuillez saisir une adresse e-mail valide"),
    ("validation.phone.pattern", "Veuillez saisir un numéro de téléphone valide"),
    ("validation.subject.pattern", "L'objet contient des caractères non autorisés"),
    ("validation.message.pattern", "Le message contient des caractères non autorisés"),
    ("validation.form_invalid", "Veuillez corriger les champs signalés"),
    // Toasts
    ("toast.success.title", "Message envoyé !"),
    ("toast.success.description", "Merci de nous avoir contactés. Nous vous répondrons rapidement."),
    ("toast.error.title", "Échec de l'envoi"),
    ("toast.error.description", "Votre message n'a pas pu être envoyé. Veuillez réessayer."),
    // Cookie consent
    ("consent.title", "Nous utilisons des cookies"),
    ("consent.description", "Nous utilisons des cookies essentiels et, avec votre accord, des cookies d'analyse et de préférences."),
    ("consent.accept_all", "Tout accepter"),
    ("consent.reject_all", "Essentiels uniquement"),
    ("consent.essential", "Essentiels"),
    ("consent.analytics", "Analyse"),
    ("consent.preferences", "Préférences"),
    // Theme
    ("theme.light", "Mode clair"),
    ("theme.dark", "Mode sombre"),
];
