use crate::auth::password::hash_password_blocking;

pub async fn cmd_hash_password(password: &str) -> anyhow::Result<()> {
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    let hash = hash_password_blocking(password.to_string()).await?;
    println!("{hash}");
    Ok(())
}
