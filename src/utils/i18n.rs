// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

type Dictionary = HashMap<&'static str, &'static str>;

lazy_static::lazy_static! {
    static ref PT: Dictionary = portuguese();
    static ref ES: Dictionary = spanish();
}

/// Idiomas soportados (código, nombre)
pub const LANGUAGES: [(&str, &str); 2] = [("PT", "Português"), ("ES", "Español")];

fn portuguese() -> Dictionary {
    let mut translations = HashMap::new();

    // Header / Dashboard
    translations.insert("app_title", "Correspondências");
    translations.insert("encomendas", "encomendas");
    translations.insert("buscar_placeholder", "Buscar por nome ou local...");
    translations.insert("filter_todos", "Todos");
    translations.insert("filter_portaria", "Na Portaria");
    translations.insert("filter_disponivel", "Disponível");
    translations.insert("filter_entregue", "Entregues");
    translations.insert("vazio_titulo", "Nenhuma encomenda encontrada");
    translations.insert("vazio_dica", "Toque em + para registrar uma nova encomenda");
    translations.insert("nova_encomenda", "Nova Encomenda");

    // Estados
    translations.insert("status_portaria", "Na Portaria");
    translations.insert("status_disponivel", "Disponível para Retirada");
    translations.insert("status_entregue", "Entregue");

    // Registro
    translations.insert("codigo_rastreio", "Código de rastreio (opcional)");
    translations.insert("escanear", "Escanear");
    translations.insert("destinatario", "Destinatário");
    translations.insert("destinatario_placeholder", "Nome do destinatário");
    translations.insert("local", "Local (Bloco/Sala)");
    translations.insert("local_placeholder", "Ex: Bloco B, Sala 12");
    translations.insert("tipo", "Tipo");
    translations.insert("tipo_caixa", "Caixa");
    translations.insert("tipo_envelope", "Envelope");
    translations.insert("tipo_pacote", "Pacote");
    translations.insert("tipo_outro", "Outro");
    translations.insert("foto", "Foto da encomenda");
    translations.insert("adicionar_foto", "Toque para adicionar foto");
    translations.insert("remover_foto", "Remover foto");
    translations.insert("registrar", "Registrar Encomenda");
    translations.insert("cancelar", "Cancelar");

    // Action sheet
    translations.insert("status_atual", "Status Atual");
    translations.insert("acao_enviar_estoque", "Enviar para Estoque (Facilities)");
    translations.insert("acao_confirmar_entrega", "Confirmar Entrega");
    translations.insert("acao_ja_entregue", "Já Entregue");
    translations.insert("assinatura", "Assinatura");
    translations.insert("assine_abaixo", "Assinatura do destinatário");
    translations.insert("limpar", "Limpar");
    translations.insert("fechar", "Fechar");
    translations.insert("historico", "Histórico");

    // Scanner
    translations.insert("scanner_titulo", "Escanear código");

    // Toasts
    translations.insert("toast_registrada", "Encomenda registrada!");
    translations.insert("toast_status", "Status atualizado");
    translations.insert("toast_codigo_lido", "Código lido com sucesso!");
    translations.insert("toast_nao_salvo", "Não foi possível salvar no dispositivo");
    translations.insert("toast_campo_obrigatorio", "Preencha o campo");

    // Nombres de campos (errores de validación)
    translations.insert("campo_recipient", "Destinatário");
    translations.insert("campo_location", "Local");
    translations.insert("campo_type", "Tipo");

    translations
}

fn spanish() -> Dictionary {
    let mut translations = HashMap::new();

    // Header / Dashboard
    translations.insert("app_title", "Correspondencia");
    translations.insert("encomendas", "paquetes");
    translations.insert("buscar_placeholder", "Buscar por nombre o ubicación...");
    translations.insert("filter_todos", "Todos");
    translations.insert("filter_portaria", "En Portería");
    translations.insert("filter_disponivel", "Disponible");
    translations.insert("filter_entregue", "Entregados");
    translations.insert("vazio_titulo", "No se encontraron paquetes");
    translations.insert("vazio_dica", "Toca + para registrar un nuevo paquete");
    translations.insert("nova_encomenda", "Nuevo Paquete");

    // Estados
    translations.insert("status_portaria", "En Portería");
    translations.insert("status_disponivel", "Disponible para Retiro");
    translations.insert("status_entregue", "Entregado");

    // Registro
    translations.insert("codigo_rastreio", "Código de seguimiento (opcional)");
    translations.insert("escanear", "Escanear");
    translations.insert("destinatario", "Destinatario");
    translations.insert("destinatario_placeholder", "Nombre del destinatario");
    translations.insert("local", "Ubicación (Bloque/Sala)");
    translations.insert("local_placeholder", "Ej: Bloque B, Sala 12");
    translations.insert("tipo", "Tipo");
    translations.insert("tipo_caixa", "Caja");
    translations.insert("tipo_envelope", "Sobre");
    translations.insert("tipo_pacote", "Paquete");
    translations.insert("tipo_outro", "Otro");
    translations.insert("foto", "Foto del paquete");
    translations.insert("adicionar_foto", "Toca para agregar foto");
    translations.insert("remover_foto", "Quitar foto");
    translations.insert("registrar", "Registrar Paquete");
    translations.insert("cancelar", "Cancelar");

    // Action sheet
    translations.insert("status_atual", "Estado Actual");
    translations.insert("acao_enviar_estoque", "Enviar a Depósito (Facilities)");
    translations.insert("acao_confirmar_entrega", "Confirmar Entrega");
    translations.insert("acao_ja_entregue", "Ya Entregado");
    translations.insert("assinatura", "Firma");
    translations.insert("assine_abaixo", "Firma del destinatario");
    translations.insert("limpar", "Borrar");
    translations.insert("fechar", "Cerrar");
    translations.insert("historico", "Historial");

    // Scanner
    translations.insert("scanner_titulo", "Escanear código");

    // Toasts
    translations.insert("toast_registrada", "¡Paquete registrado!");
    translations.insert("toast_status", "Estado actualizado");
    translations.insert("toast_codigo_lido", "¡Código leído correctamente!");
    translations.insert("toast_nao_salvo", "No se pudo guardar en el dispositivo");
    translations.insert("toast_campo_obrigatorio", "Complete el campo");

    translations.insert("campo_recipient", "Destinatario");
    translations.insert("campo_location", "Ubicación");
    translations.insert("campo_type", "Tipo");

    translations
}

/// Función de traducción
///
/// Busca en el idioma pedido, luego en portugués; si no hay traducción
/// devuelve la clave.
pub fn t(key: &str, lang: &str) -> String {
    let dictionary: &Dictionary = match lang.to_uppercase().as_str() {
        "ES" => &*ES,
        _ => &*PT,
    };

    dictionary
        .get(key)
        .or_else(|| PT.get(key))
        .map(|s| s.to_string())
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_spanish_key_exists_in_portuguese() {
        for key in ES.keys() {
            assert!(PT.contains_key(key), "falta la clave '{}' en PT", key);
        }
    }

    #[test]
    fn unknown_language_and_key_fall_back() {
        assert_eq!(t("toast_registrada", "FR"), "Encomenda registrada!");
        assert_eq!(t("toast_registrada", "es"), "¡Paquete registrado!");
        assert_eq!(t("no_existe", "PT"), "no_existe");
    }
}
