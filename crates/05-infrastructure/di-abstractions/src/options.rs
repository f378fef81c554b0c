//! 选项访问器

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// 已绑定的选项值
///
/// 相当于宿主容器中的 `IOptions<T>`，同一个宿主内多次解析得到同一份数据。
pub struct Options<T> {
    value: Arc<T>,
}

impl<T> Options<T> {
    /// 包装选项值
    pub fn new(value: Arc<T>) -> Self {
        Self { value }
    }

    /// 选项值
    pub fn value(&self) -> &T {
        &self.value
    }

    /// 共享的选项值
    pub fn shared(&self) -> Arc<T> {
        Arc::clone(&self.value)
    }
}

impl<T> Clone for Options<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: Default> Default for Options<T> {
    fn default() -> Self {
        Self::new(Arc::new(T::default()))
    }
}

impl<T> Deref for Options<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Options<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Options").field(&self.value).finish()
    }
}
