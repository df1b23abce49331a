use serde::{Deserialize, Serialize};

/// 默认最大历史记录数
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// 宿主可见的撤销/重做按钮状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryFlags {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// 快照历史管理器
///
/// 双栈结构：撤销栈栈顶始终是当前显示的状态，栈底是基准（初始）状态。
/// 撤销栈只剩一项时撤销为空操作。
#[derive(Debug)]
pub struct HistoryManager<T> {
    /// 撤销栈
    undo_stack: Vec<T>,
    /// 重做栈
    redo_stack: Vec<T>,
    /// 最大历史记录数
    capacity: usize,
}

impl<T> Default for HistoryManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HistoryManager<T> {
    /// 创建新的历史记录管理器
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// 创建指定容量的历史记录管理器
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: Vec::with_capacity(capacity + 1),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    /// 压入新快照
    ///
    /// 超出容量时移除最旧的记录，并清空重做栈。
    pub fn snapshot(&mut self, state: T) {
        self.undo_stack.push(state);
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// 撤销
    ///
    /// 返回撤销后应显示的状态；撤销栈只剩基准项时返回 None。
    pub fn undo(&mut self) -> Option<&T> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let top = self.undo_stack.pop()?;
        self.redo_stack.push(top);
        self.undo_stack.last()
    }

    /// 重做
    pub fn redo(&mut self) -> Option<&T> {
        let state = self.redo_stack.pop()?;
        self.undo_stack.push(state);
        self.undo_stack.last()
    }

    /// 当前显示的状态
    pub fn current(&self) -> Option<&T> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn flags(&self) -> HistoryFlags {
        HistoryFlags {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 清空所有历史记录
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
