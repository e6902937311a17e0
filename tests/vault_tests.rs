//! Integration tests for the cloudcents vault module.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cloudcents::config::Settings;
use cloudcents::crypto::{KeyMaterial, KeySource, NONCE_LEN};
use cloudcents::errors::VaultError;
use cloudcents::vault::{Vault, VaultConfig};
use tempfile::TempDir;

/// Helper: a vault config rooted in a fresh temp dir, nested one level
/// deeper so directory creation is exercised.
fn vault_config() -> (TempDir, VaultConfig) {
    let dir = TempDir::new().expect("create temp dir");
    let config_dir = dir.path().join(".config").join("cloudcent");
    let config = Settings::default()
        .vault_config(&config_dir)
        .expect("default settings");
    (dir, config)
}

fn fixed_key_vault(dir: &TempDir) -> (Vault, PathBuf) {
    let path = dir.path().join("api_key.txt");
    (Vault::new(&path, KeyMaterial::new([0x5A; 32])), path)
}

fn key_file(config: &VaultConfig) -> &Path {
    match &config.key_source {
        KeySource::File(path) => path,
        #[allow(unreachable_patterns)]
        _ => panic!("default key source should be a file"),
    }
}

// ---------------------------------------------------------------------------
// Round-trip and overwrite
// ---------------------------------------------------------------------------

#[test]
fn store_then_load_returns_secret() {
    let (_dir, config) = vault_config();

    let vault = Vault::open_for_store(&config).expect("open for store");
    vault.store(b"sk-test-123").expect("store");

    assert!(config.record_path.exists());

    // A fresh handle re-reads the key from disk.
    let vault = Vault::open(&config).expect("open");
    assert_eq!(vault.load().unwrap().as_slice(), b"sk-test-123");
}

#[test]
fn roundtrip_preserves_arbitrary_bytes() {
    let dir = TempDir::new().unwrap();
    let (vault, _) = fixed_key_vault(&dir);

    let secrets: [&[u8]; 4] = [
        b"x",
        b"sk-\xff\x00\x01binary",
        "cl\u{e9}-unicode-\u{1f511}".as_bytes(),
        &[0u8; 4096],
    ];
    for secret in secrets {
        vault.store(secret).unwrap();
        assert_eq!(vault.load().unwrap().as_slice(), secret);
    }
}

#[test]
fn second_store_replaces_first() {
    let dir = TempDir::new().unwrap();
    let (vault, _) = fixed_key_vault(&dir);

    vault.store(b"sk-first").unwrap();
    vault.store(b"sk-second").unwrap();

    assert_eq!(vault.load().unwrap().as_slice(), b"sk-second");
}

#[test]
fn store_leaves_no_temp_files_behind() {
    let dir = TempDir::new().unwrap();
    let (vault, _) = fixed_key_vault(&dir);

    vault.store(b"sk-one").unwrap();
    vault.store(b"sk-two").unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only api_key.txt should remain");
}

#[test]
fn empty_secret_is_rejected_and_nothing_written() {
    let dir = TempDir::new().unwrap();
    let (vault, path) = fixed_key_vault(&dir);

    assert!(matches!(vault.store(b""), Err(VaultError::EmptySecret)));
    assert!(!path.exists());
}

// ---------------------------------------------------------------------------
// Sealed record format
// ---------------------------------------------------------------------------

#[test]
fn stored_record_is_base64_without_plaintext() {
    let dir = TempDir::new().unwrap();
    let (vault, path) = fixed_key_vault(&dir);
    vault.store(b"sk-visible?").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("sk-visible"));
    assert!(!text.ends_with('\n'));

    let sealed = BASE64.decode(&text).expect("record should be base64");
    assert_eq!(sealed.len(), NONCE_LEN + b"sk-visible?".len() + 16);
}

#[test]
fn same_secret_stored_twice_gives_different_records() {
    let dir = TempDir::new().unwrap();
    let (vault, path) = fixed_key_vault(&dir);

    vault.store(b"sk-repeat").unwrap();
    let first = fs::read_to_string(&path).unwrap();
    vault.store(b"sk-repeat").unwrap();
    let second = fs::read_to_string(&path).unwrap();

    assert_ne!(first, second);
}

#[test]
fn trailing_newline_in_record_is_tolerated() {
    let dir = TempDir::new().unwrap();
    let (vault, path) = fixed_key_vault(&dir);
    vault.store(b"sk-edited").unwrap();

    let mut text = fs::read_to_string(&path).unwrap();
    text.push('\n');
    fs::write(&path, text).unwrap();

    assert_eq!(vault.load().unwrap().as_slice(), b"sk-edited");
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn load_without_record_is_not_found() {
    let dir = TempDir::new().unwrap();
    let (vault, _) = fixed_key_vault(&dir);

    assert!(matches!(vault.load(), Err(VaultError::NotFound)));
}

#[test]
fn open_without_provisioned_key_is_not_found_and_creates_nothing() {
    let (dir, config) = vault_config();

    assert!(matches!(Vault::open(&config), Err(VaultError::NotFound)));
    assert!(!dir.path().join(".config").exists());
}

#[test]
fn garbage_record_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let (vault, path) = fixed_key_vault(&dir);
    fs::write(&path, "definitely <not> base64 !!!").unwrap();

    assert!(matches!(vault.load(), Err(VaultError::Corrupt)));
}

#[test]
fn short_record_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let (vault, path) = fixed_key_vault(&dir);
    fs::write(&path, BASE64.encode([7u8; NONCE_LEN + 4])).unwrap();

    assert!(matches!(vault.load(), Err(VaultError::Corrupt)));
}

#[test]
fn flipped_ciphertext_byte_fails_authentication() {
    let dir = TempDir::new().unwrap();
    let (vault, path) = fixed_key_vault(&dir);
    vault.store(b"sk-integrity").unwrap();

    let sealed = BASE64.decode(fs::read_to_string(&path).unwrap()).unwrap();

    for i in NONCE_LEN..sealed.len() {
        let mut tampered = sealed.clone();
        tampered[i] ^= 0x80;
        fs::write(&path, BASE64.encode(&tampered)).unwrap();

        assert!(
            matches!(vault.load(), Err(VaultError::AuthenticationFailed)),
            "tampering at byte {i} was not detected"
        );
    }
}

#[test]
fn record_from_another_installation_fails_authentication() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("api_key.txt");

    Vault::new(&path, KeyMaterial::new([1; 32]))
        .store(b"sk-mine")
        .unwrap();
    let other = Vault::new(&path, KeyMaterial::new([2; 32]));

    assert!(matches!(other.load(), Err(VaultError::AuthenticationFailed)));
}

#[test]
fn replaced_key_file_invalidates_old_record() {
    let (_dir, config) = vault_config();
    Vault::open_for_store(&config)
        .unwrap()
        .store(b"sk-orphaned")
        .unwrap();

    fs::write(key_file(&config), [0xEE; 32]).unwrap();

    let vault = Vault::open(&config).unwrap();
    assert!(matches!(vault.load(), Err(VaultError::AuthenticationFailed)));
}

#[test]
fn empty_leftover_key_file_does_not_block_store() {
    let (_dir, config) = vault_config();
    let key_path = key_file(&config);
    fs::create_dir_all(key_path.parent().unwrap()).unwrap();
    fs::write(key_path, b"").unwrap();

    Vault::open_for_store(&config)
        .and_then(|v| v.store(b"sk-test-123"))
        .expect("store over empty key file");

    assert_eq!(fs::read(key_path).unwrap().len(), 32);
    let vault = Vault::open(&config).unwrap();
    assert_eq!(vault.load().unwrap().as_slice(), b"sk-test-123");
}

#[cfg(unix)]
#[test]
fn unwritable_parent_is_directory_unavailable() {
    let dir = TempDir::new().unwrap();
    // A regular file where a directory is expected.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let vault = Vault::new(blocker.join("cloudcent/api_key.txt"), KeyMaterial::new([3; 32]));
    assert!(matches!(
        vault.store(b"sk-nowhere"),
        Err(VaultError::DirectoryUnavailable { .. })
    ));
}

#[test]
fn record_path_that_is_a_directory_fails_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("api_key.txt");
    // A non-empty directory cannot be replaced by a rename.
    fs::create_dir_all(path.join("occupied")).unwrap();

    let vault = Vault::new(&path, KeyMaterial::new([4; 32]));
    assert!(matches!(
        vault.store(b"sk-blocked"),
        Err(VaultError::WriteFailed { .. })
    ));
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn record_key_and_directory_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, config) = vault_config();
    Vault::open_for_store(&config)
        .unwrap()
        .store(b"sk-test-123")
        .unwrap();

    let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;

    assert_eq!(mode(config.record_path.as_path()), 0o600);
    assert_eq!(mode(config.record_path.parent().unwrap()), 0o700);
    assert_eq!(mode(key_file(&config)), 0o600);
}
