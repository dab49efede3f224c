pub(super) const UPSERT_OBRA: &str = r#"
    INSERT INTO obras (id, nombre, estado, updated_at)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(id) DO UPDATE SET
        nombre = excluded.nombre,
        estado = excluded.estado,
        updated_at = excluded.updated_at
"#;

pub(super) const SELECT_OBRA_BY_ID: &str = r#"
    SELECT id, nombre, estado, updated_at
    FROM obras
    WHERE id = ?1
"#;

pub(super) const SELECT_ALL_OBRAS: &str = r#"
    SELECT id, nombre, estado, updated_at
    FROM obras
    ORDER BY updated_at DESC
"#;

pub(super) const SELECT_OBRAS_BY_ESTADO: &str = r#"
    SELECT id, nombre, estado, updated_at
    FROM obras
    WHERE estado = ?1
    ORDER BY updated_at DESC
"#;

pub(super) const SEARCH_OBRAS: &str = r#"
    SELECT id, nombre, estado, updated_at
    FROM obras
    WHERE nombre LIKE ?1
    ORDER BY nombre ASC
"#;

pub(super) const DELETE_OBRA: &str = "DELETE FROM obras WHERE id = ?1";

pub(super) const COUNT_OBRAS: &str = "SELECT COUNT(*) FROM obras";

pub(super) const CLEAR_OBRAS: &str = "DELETE FROM obras";

pub(super) const UPSERT_TAREA: &str = r#"
    INSERT INTO tareas (id, obra_id, nombre, estado, asignado_a, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT(id) DO UPDATE SET
        obra_id = excluded.obra_id,
        nombre = excluded.nombre,
        estado = excluded.estado,
        asignado_a = excluded.asignado_a,
        updated_at = excluded.updated_at
"#;

pub(super) const SELECT_TAREA_BY_ID: &str = r#"
    SELECT id, obra_id, nombre, estado, asignado_a, updated_at
    FROM tareas
    WHERE id = ?1
"#;

pub(super) const SELECT_ALL_TAREAS: &str = r#"
    SELECT id, obra_id, nombre, estado, asignado_a, updated_at
    FROM tareas
    ORDER BY updated_at DESC
"#;

pub(super) const SELECT_TAREAS_BY_OBRA: &str = r#"
    SELECT id, obra_id, nombre, estado, asignado_a, updated_at
    FROM tareas
    WHERE obra_id = ?1
    ORDER BY updated_at DESC
"#;

pub(super) const SELECT_TAREAS_BY_ESTADO: &str = r#"
    SELECT id, obra_id, nombre, estado, asignado_a, updated_at
    FROM tareas
    WHERE estado = ?1
    ORDER BY updated_at DESC
"#;

pub(super) const SELECT_TAREAS_BY_ASIGNADO: &str = r#"
    SELECT id, obra_id, nombre, estado, asignado_a, updated_at
    FROM tareas
    WHERE asignado_a = ?1
    ORDER BY updated_at DESC
"#;

pub(super) const DELETE_TAREA: &str = "DELETE FROM tareas WHERE id = ?1";

pub(super) const COUNT_TAREAS: &str = "SELECT COUNT(*) FROM tareas";

pub(super) const CLEAR_TAREAS: &str = "DELETE FROM tareas";

pub(super) const INSERT_AVANCE: &str = r#"
    INSERT INTO avances (offline_id, server_id, tarea_id, descripcion, porcentaje, synced, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub(super) const UPDATE_AVANCE: &str = r#"
    UPDATE avances
    SET offline_id = ?2,
        server_id = ?3,
        tarea_id = ?4,
        descripcion = ?5,
        porcentaje = ?6,
        synced = ?7,
        created_at = ?8
    WHERE local_id = ?1
"#;

pub(super) const SELECT_AVANCE_BY_LOCAL_ID: &str = r#"
    SELECT local_id, offline_id, server_id, tarea_id, descripcion, porcentaje, synced, created_at
    FROM avances
    WHERE local_id = ?1
"#;

pub(super) const SELECT_AVANCE_BY_OFFLINE_ID: &str = r#"
    SELECT local_id, offline_id, server_id, tarea_id, descripcion, porcentaje, synced, created_at
    FROM avances
    WHERE offline_id = ?1
"#;

pub(super) const SELECT_AVANCES_BY_TAREA: &str = r#"
    SELECT local_id, offline_id, server_id, tarea_id, descripcion, porcentaje, synced, created_at
    FROM avances
    WHERE tarea_id = ?1
    ORDER BY created_at DESC
"#;

pub(super) const SELECT_UNSYNCED_AVANCES: &str = r#"
    SELECT local_id, offline_id, server_id, tarea_id, descripcion, porcentaje, synced, created_at
    FROM avances
    WHERE synced = 0
    ORDER BY local_id ASC
"#;

pub(super) const MARK_AVANCE_SYNCED: &str = r#"
    UPDATE avances
    SET synced = 1,
        server_id = ?2
    WHERE offline_id = ?1
"#;

pub(super) const DELETE_AVANCE: &str = "DELETE FROM avances WHERE local_id = ?1";

pub(super) const COUNT_AVANCES: &str = "SELECT COUNT(*) FROM avances";

pub(super) const CLEAR_AVANCES: &str = "DELETE FROM avances";

pub(super) const INSERT_FOTO: &str = r#"
    INSERT INTO fotos_pendientes (avance_id, filename, mime_type, datos, synced, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub(super) const SELECT_FOTO_BY_ID: &str = r#"
    SELECT id, avance_id, filename, mime_type, datos, synced, created_at
    FROM fotos_pendientes
    WHERE id = ?1
"#;

pub(super) const SELECT_FOTOS_BY_AVANCE: &str = r#"
    SELECT id, avance_id, filename, mime_type, datos, synced, created_at
    FROM fotos_pendientes
    WHERE avance_id = ?1
    ORDER BY id ASC
"#;

pub(super) const SELECT_FOTOS_PENDIENTES: &str = r#"
    SELECT id, avance_id, filename, mime_type, datos, synced, created_at
    FROM fotos_pendientes
    WHERE synced = 0
    ORDER BY id ASC
"#;

pub(super) const MARK_FOTO_SYNCED: &str = r#"
    UPDATE fotos_pendientes
    SET synced = 1
    WHERE id = ?1
"#;

pub(super) const DELETE_FOTO: &str = "DELETE FROM fotos_pendientes WHERE id = ?1";

pub(super) const COUNT_FOTOS: &str = "SELECT COUNT(*) FROM fotos_pendientes";

pub(super) const CLEAR_FOTOS: &str = "DELETE FROM fotos_pendientes";

pub(super) const UPSERT_ITEM: &str = r#"
    INSERT INTO inventario (id, codigo, categoria_id, nombre, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(id) DO UPDATE SET
        codigo = excluded.codigo,
        categoria_id = excluded.categoria_id,
        nombre = excluded.nombre,
        updated_at = excluded.updated_at
"#;

pub(super) const SELECT_ITEM_BY_ID: &str = r#"
    SELECT id, codigo, categoria_id, nombre, updated_at
    FROM inventario
    WHERE id = ?1
"#;

pub(super) const SELECT_ALL_ITEMS: &str = r#"
    SELECT id, codigo, categoria_id, nombre, updated_at
    FROM inventario
    ORDER BY nombre ASC
"#;

pub(super) const SELECT_ITEMS_BY_CATEGORIA: &str = r#"
    SELECT id, codigo, categoria_id, nombre, updated_at
    FROM inventario
    WHERE categoria_id = ?1
    ORDER BY nombre ASC
"#;

pub(super) const SEARCH_INVENTARIO: &str = r#"
    SELECT id, codigo, categoria_id, nombre, updated_at
    FROM inventario
    WHERE nombre LIKE ?1 OR codigo LIKE ?1
    ORDER BY nombre ASC
"#;

pub(super) const COUNT_ITEMS: &str = "SELECT COUNT(*) FROM inventario";

pub(super) const CLEAR_INVENTARIO: &str = "DELETE FROM inventario";

pub(super) const UPSERT_USUARIO: &str = r#"
    INSERT INTO usuarios (id, nombre, email, rol, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(id) DO UPDATE SET
        nombre = excluded.nombre,
        email = excluded.email,
        rol = excluded.rol,
        updated_at = excluded.updated_at
"#;

pub(super) const SELECT_USUARIO_BY_ID: &str = r#"
    SELECT id, nombre, email, rol, updated_at
    FROM usuarios
    WHERE id = ?1
"#;

pub(super) const SELECT_ALL_USUARIOS: &str = r#"
    SELECT id, nombre, email, rol, updated_at
    FROM usuarios
    ORDER BY nombre ASC
"#;

pub(super) const DELETE_USUARIO: &str = "DELETE FROM usuarios WHERE id = ?1";

pub(super) const COUNT_USUARIOS: &str = "SELECT COUNT(*) FROM usuarios";

pub(super) const CLEAR_USUARIOS: &str = "DELETE FROM usuarios";

pub(super) const INSERT_QUEUE_ENTRY: &str = r#"
    INSERT INTO sync_queue (tipo, payload, retry_count, next_attempt_at, last_error, created_at)
    VALUES (?1, ?2, 0, ?3, NULL, ?4)
"#;

pub(super) const SELECT_PENDING_ENTRIES: &str = r#"
    SELECT id, tipo, payload, retry_count, next_attempt_at, last_error, created_at
    FROM sync_queue
    ORDER BY id ASC
"#;

pub(super) const DELETE_QUEUE_ENTRY: &str = "DELETE FROM sync_queue WHERE id = ?1";

pub(super) const RECORD_QUEUE_FAILURE: &str = r#"
    UPDATE sync_queue
    SET retry_count = retry_count + 1,
        next_attempt_at = ?2,
        last_error = ?3
    WHERE id = ?1
"#;

pub(super) const COUNT_QUEUE: &str = "SELECT COUNT(*) FROM sync_queue";

pub(super) const INSERT_DEAD_LETTER: &str = r#"
    INSERT INTO dead_letters (queue_id, tipo, payload, retry_count, last_error, created_at, dead_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub(super) const SELECT_DEAD_LETTERS: &str = r#"
    SELECT id, queue_id, tipo, payload, retry_count, last_error, created_at, dead_at
    FROM dead_letters
    ORDER BY dead_at DESC
"#;

pub(super) const UPSERT_CONFIG: &str = r#"
    INSERT INTO config (clave, valor, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(clave) DO UPDATE SET
        valor = excluded.valor,
        updated_at = excluded.updated_at
"#;

pub(super) const SELECT_CONFIG: &str = r#"
    SELECT valor
    FROM config
    WHERE clave = ?1
"#;

pub(super) const DELETE_CONFIG: &str = "DELETE FROM config WHERE clave = ?1";

pub(super) const UPSERT_CACHED_RESPONSE: &str = r#"
    INSERT INTO response_cache (cache_key, body, fetched_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(cache_key) DO UPDATE SET
        body = excluded.body,
        fetched_at = excluded.fetched_at
"#;

pub(super) const SELECT_CACHED_RESPONSE: &str = r#"
    SELECT body, fetched_at
    FROM response_cache
    WHERE cache_key = ?1
"#;

pub(super) const CLEAR_RESPONSE_CACHE: &str = "DELETE FROM response_cache";
