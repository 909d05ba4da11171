use std::path::PathBuf;

use log::{debug, info};
use uuid::Uuid;

use crate::config::ConfDir;
use crate::db::{self, Database, DbError, Person, crud, encode_vector};

pub struct PersonDBBuilder {
    /// 数据库文件路径，`None` 时使用内存数据库
    path: Option<PathBuf>,
}

impl PersonDBBuilder {
    pub fn new(conf_dir: ConfDir) -> Self {
        Self { path: Some(conf_dir.database()) }
    }

    /// 使用内存数据库，进程退出后数据丢失
    pub fn memory() -> Self {
        Self { path: None }
    }

    pub async fn open(self) -> Result<PersonDB, DbError> {
        let db = match self.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                db::init_db(&path).await?
            }
            None => db::init_memory_db().await?,
        };
        Ok(PersonDB { db })
    }
}

/// 人员记录存储
///
/// 所有对数据库的访问都经过这里，由调用方显式构造后注入。
#[derive(Clone)]
pub struct PersonDB {
    db: Database,
}

impl PersonDB {
    /// 创建新的人员，向量为空
    pub async fn create(&self, name: &str, last_name: &str) -> Result<Person, DbError> {
        let id = Uuid::new_v4();
        crud::add_person(&self.db, id, name, last_name).await?;
        info!("创建人员: {id}");
        Ok(Person { id, name: name.to_owned(), last_name: last_name.to_owned(), vector: None })
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Person>, DbError> {
        crud::get_person(&self.db, id).await?.map(Person::try_from).transpose()
    }

    /// 删除人员及其向量，返回记录是否存在
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let deleted = crud::delete_person(&self.db, id).await?;
        if deleted {
            info!("删除人员: {id}");
        }
        Ok(deleted)
    }

    /// 所有人员 ID，按创建顺序
    pub async fn list(&self) -> Result<Vec<Uuid>, DbError> {
        Ok(crud::get_person_ids(&self.db).await?)
    }

    /// 所有人员，按创建顺序
    pub async fn persons(&self) -> Result<Vec<Person>, DbError> {
        crud::get_persons(&self.db).await?.into_iter().map(Person::try_from).collect()
    }

    /// 用新向量完整覆盖旧向量，并返回更新后的记录
    pub async fn set_vector(&self, id: Uuid, vector: &[f64]) -> Result<Person, DbError> {
        let mut tx = self.db.begin().await?;
        if !crud::set_vector(&mut *tx, id, encode_vector(vector)).await? {
            return Err(DbError::NotFound(id));
        }
        let record = crud::get_person(&mut *tx, id).await?.ok_or(DbError::NotFound(id))?;
        tx.commit().await?;

        debug!("人员 {id} 的向量长度: {}", vector.len());
        Person::try_from(record)
    }

    /// 获取人员的向量，记录不存在时返回 [`DbError::NotFound`]
    pub async fn get_vector(&self, id: Uuid) -> Result<Option<Vec<f64>>, DbError> {
        match crud::get_vector(&self.db, id).await? {
            None => Err(DbError::NotFound(id)),
            Some(None) => Ok(None),
            Some(Some(bytes)) => Ok(Some(db::decode_vector(id, &bytes)?)),
        }
    }
}
