#[derive(Clone, Debug)]
pub enum Principal {
    User { user_id: i32 },
    Admin { admin_id: i32 },
}
