//! 父级内排序位置
//!
//! 课程任务按课程排序，年级课程按年级排序。位置从 0 开始且连续：
//! 插入时追加到末尾，移动和删除后由存储层在事务中重新编号。

use serde::Deserialize;

/// 移动目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    Up,
    Down,
    Top,
    Bottom,
    Position(i32),
}

impl MoveTarget {
    /// 计算移动后的下标，结果总是落在 `[0, count - 1]` 内
    pub fn resolve(self, current: usize, count: usize) -> usize {
        let last = count.saturating_sub(1);
        match self {
            MoveTarget::Up => current.saturating_sub(1),
            MoveTarget::Down => (current + 1).min(last),
            MoveTarget::Top => 0,
            MoveTarget::Bottom => last,
            MoveTarget::Position(position) => (position.max(0) as usize).min(last),
        }
    }
}

/// 新记录追加到末尾时的位置
pub fn next_position(max_existing: Option<i32>) -> i32 {
    max_existing.map_or(0, |max| max + 1)
}

/// 在已排序的列表中移动一个元素，返回其新下标
pub fn move_item<T>(items: &mut Vec<T>, current: usize, target: MoveTarget) -> usize {
    if current >= items.len() {
        return current;
    }
    let new_index = target.resolve(current, items.len());
    let item = items.remove(current);
    items.insert(new_index, item);
    new_index
}

/// 重新编号后位置发生变化的元素：`(下标, 新位置)`
pub fn changed_positions<T, F>(items: &[T], position_of: F) -> Vec<(usize, i32)>
where
    F: Fn(&T) -> i32,
{
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let expected = index as i32;
            (position_of(item) != expected).then_some((index, expected))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renumber(items: &mut [(char, i32)]) {
        for (index, position) in changed_positions(items, |item| item.1) {
            items[index].1 = position;
        }
    }

    fn names(items: &[(char, i32)]) -> String {
        items.iter().map(|item| item.0).collect()
    }

    #[test]
    fn test_resolve_clamps() {
        assert_eq!(MoveTarget::Up.resolve(0, 3), 0);
        assert_eq!(MoveTarget::Down.resolve(2, 3), 2);
        assert_eq!(MoveTarget::Top.resolve(2, 3), 0);
        assert_eq!(MoveTarget::Bottom.resolve(0, 3), 2);
        assert_eq!(MoveTarget::Position(10).resolve(0, 3), 2);
        assert_eq!(MoveTarget::Position(-4).resolve(1, 3), 0);
        assert_eq!(MoveTarget::Bottom.resolve(0, 0), 0);
    }

    #[test]
    fn test_moves_keep_positions_contiguous() {
        let mut items = vec![('a', 0), ('b', 1), ('c', 2), ('d', 3)];

        assert_eq!(move_item(&mut items, 0, MoveTarget::Bottom), 3);
        renumber(&mut items);
        assert_eq!(names(&items), "bcda");

        assert_eq!(move_item(&mut items, 3, MoveTarget::Up), 2);
        renumber(&mut items);
        assert_eq!(names(&items), "bcad");

        move_item(&mut items, 2, MoveTarget::Position(0));
        renumber(&mut items);
        assert_eq!(names(&items), "abcd");

        let positions: Vec<i32> = items.iter().map(|item| item.1).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_changed_positions_after_delete() {
        // 删除 b 之后剩余元素需要补齐空位
        let items = vec![('a', 0), ('c', 2), ('d', 3)];
        assert_eq!(
            changed_positions(&items, |item| item.1),
            vec![(1, 1), (2, 2)]
        );
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let mut items = vec![('a', 0)];
        assert_eq!(move_item(&mut items, 5, MoveTarget::Top), 5);
        assert_eq!(names(&items), "a");
    }

    #[test]
    fn test_next_position() {
        assert_eq!(next_position(None), 0);
        assert_eq!(next_position(Some(4)), 5);
    }

    #[test]
    fn test_move_target_deserialize() {
        let up: MoveTarget = serde_json::from_str(r#""up""#).unwrap();
        assert_eq!(up, MoveTarget::Up);
        let position: MoveTarget = serde_json::from_str(r#"{"position": 3}"#).unwrap();
        assert_eq!(position, MoveTarget::Position(3));
    }
}
